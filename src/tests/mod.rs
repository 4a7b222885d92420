use std::sync::atomic::{AtomicUsize, Ordering};

use clap::Parser;

use crate::api::{IdSet, ObjectRecord};
use crate::catalog;
use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::output::{self, DisplayMode, OutputFormat};
use crate::view::ViewState;

fn stub_record(id: u64, thumbnail: bool) -> ObjectRecord {
    ObjectRecord {
        object_id: id,
        title: format!("Object {id}"),
        primary_image_small: if thumbnail {
            format!("https://images.example/{id}-small.jpg")
        } else {
            String::new()
        },
        ..ObjectRecord::default()
    }
}

async fn fetch_all_with_thumbnails(id: u64) -> Result<ObjectRecord, String> {
    Ok(stub_record(id, true))
}

// ids 10..=18 resolve to records without a thumbnail
async fn fetch_middle_slice_bare(id: u64) -> Result<ObjectRecord, String> {
    Ok(stub_record(id, !(10..=18).contains(&id)))
}

#[test]
fn page_count_rounds_up_and_floors_at_one() {
    assert_eq!(catalog::page_count(0, 9), 1);
    assert_eq!(catalog::page_count(1, 9), 1);
    assert_eq!(catalog::page_count(9, 9), 1);
    assert_eq!(catalog::page_count(10, 9), 2);
    assert_eq!(catalog::page_count(27, 9), 3);
    assert_eq!(catalog::page_count(30, 9), 4);
    assert_eq!(catalog::page_count(250, 100), 3);
}

#[test]
fn page_window_is_one_based() {
    assert_eq!(catalog::page_window(1, 9), (0, 9));
    assert_eq!(catalog::page_window(2, 9), (9, 18));
    assert_eq!(catalog::page_window(4, 100), (300, 400));
}

#[tokio::test]
async fn loader_fills_a_full_page_in_source_order() {
    let ids: Vec<u64> = (1..=30).collect();
    let records = catalog::load_page(&ids, 1, 9, fetch_all_with_thumbnails).await;
    let loaded: Vec<u64> = records.iter().map(|r| r.object_id).collect();
    assert_eq!(loaded, (1..=9).collect::<Vec<u64>>());
}

#[tokio::test]
async fn loader_skips_a_fully_filtered_slice_and_pulls_from_the_next() {
    let ids: Vec<u64> = (1..=30).collect();
    let records = catalog::load_page(&ids, 2, 9, fetch_middle_slice_bare).await;
    let loaded: Vec<u64> = records.iter().map(|r| r.object_id).collect();
    assert_eq!(loaded, (19..=27).collect::<Vec<u64>>());
}

#[tokio::test]
async fn loader_returns_a_short_final_page() {
    let ids: Vec<u64> = (1..=30).collect();
    let records = catalog::load_page(&ids, 4, 9, fetch_all_with_thumbnails).await;
    let loaded: Vec<u64> = records.iter().map(|r| r.object_id).collect();
    assert_eq!(loaded, vec![28, 29, 30]);
}

#[tokio::test]
async fn loader_drops_failed_fetches_without_aborting_the_batch() {
    let ids: Vec<u64> = (1..=12).collect();
    let fetch = |id: u64| async move {
        if id % 2 == 0 {
            Err("connection reset".to_string())
        } else {
            Ok(stub_record(id, true))
        }
    };
    let records = catalog::load_page(&ids, 1, 4, fetch).await;
    let loaded: Vec<u64> = records.iter().map(|r| r.object_id).collect();
    assert_eq!(loaded, vec![1, 3, 5, 7]);
}

#[tokio::test]
async fn loader_keeps_consuming_slices_until_ids_are_exhausted() {
    let ids: Vec<u64> = (1..=20).collect();
    let calls = AtomicUsize::new(0);
    let fetch = |id: u64| {
        calls.fetch_add(1, Ordering::SeqCst);
        async move { Ok::<ObjectRecord, String>(stub_record(id, false)) }
    };
    let records = catalog::load_page(&ids, 1, 9, fetch).await;
    assert!(records.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 20);
}

#[tokio::test]
async fn loader_never_returns_more_than_items_per_page() {
    let ids: Vec<u64> = (1..=50).collect();
    let records = catalog::load_page(&ids, 1, 9, fetch_middle_slice_bare).await;
    assert_eq!(records.len(), 9);
    assert!(records.iter().all(|r| r.has_thumbnail()));
}

#[tokio::test]
async fn loader_is_idempotent_for_a_deterministic_fetcher() {
    let ids: Vec<u64> = (1..=30).collect();
    let first = catalog::load_page(&ids, 2, 9, fetch_middle_slice_bare).await;
    let second = catalog::load_page(&ids, 2, 9, fetch_middle_slice_bare).await;
    let first_ids: Vec<u64> = first.iter().map(|r| r.object_id).collect();
    let second_ids: Vec<u64> = second.iter().map(|r| r.object_id).collect();
    assert_eq!(first_ids, second_ids);
}

#[tokio::test]
async fn loader_on_empty_ids_returns_empty() {
    let records = catalog::load_page(&[], 1, 9, fetch_all_with_thumbnails).await;
    assert!(records.is_empty());
}

#[test]
fn pager_is_a_noop_at_both_boundaries() {
    let mut view = ViewState::new(6, 9, DisplayMode::Grid);
    view.set_ids(IdSet {
        ids: (1..=30).collect(),
        total: 30,
    });
    assert_eq!(view.total_pages(), 4);

    assert!(!view.previous());
    assert_eq!(view.current_page(), 1);

    assert!(view.next());
    assert!(view.next());
    assert!(view.next());
    assert_eq!(view.current_page(), 4);
    assert!(!view.next());
    assert_eq!(view.current_page(), 4);
    assert!(view.previous());
    assert_eq!(view.current_page(), 3);

    assert!(view.go_to(1));
    assert_eq!(view.current_page(), 1);
    assert!(!view.go_to(0));
    assert!(!view.go_to(5));
    assert_eq!(view.current_page(), 1);
}

#[test]
fn empty_catalog_has_one_page_and_disabled_controls() {
    let mut view = ViewState::new(6, 9, DisplayMode::Grid);
    view.set_ids(IdSet::default());
    assert_eq!(view.total_pages(), 1);
    assert!(!view.has_next());
    assert!(!view.has_previous());
    assert!(view.records().is_empty());
}

#[test]
fn selecting_a_department_resets_page_and_invalidates_ids() {
    let mut view = ViewState::new(6, 9, DisplayMode::List);
    view.set_ids(IdSet {
        ids: (1..=30).collect(),
        total: 30,
    });
    view.next();
    assert_eq!(view.current_page(), 2);

    view.select_department(11);
    assert_eq!(view.department_id(), 11);
    assert_eq!(view.current_page(), 1);
    assert!(view.needs_ids());
    assert_eq!(view.mode(), DisplayMode::List);
}

#[test]
fn stale_loads_are_discarded_and_current_loads_apply() {
    let mut view = ViewState::new(6, 9, DisplayMode::Grid);
    view.set_ids(IdSet {
        ids: vec![1, 2, 3],
        total: 3,
    });
    let stale = view.begin_load();
    let current = view.begin_load();

    assert!(!view.apply_load(stale, vec![stub_record(1, true)]));
    assert!(view.records().is_empty());

    assert!(view.apply_load(current, vec![stub_record(2, true)]));
    assert_eq!(view.records().len(), 1);
    assert_eq!(view.records()[0].object_id, 2);
}

#[test]
fn origin_line_composes_culture_and_period() {
    assert_eq!(
        output::origin_line("Ming", "16th century").as_deref(),
        Some("Origin: Ming, 16th century.")
    );
    assert_eq!(output::origin_line("Ming", "").as_deref(), Some("Origin: Ming."));
    assert_eq!(
        output::origin_line("", "16th century").as_deref(),
        Some("Origin: 16th century.")
    );
    assert_eq!(output::origin_line("", ""), None);
}

#[test]
fn display_title_falls_back_to_untitled_and_strips_markup() {
    let mut record = stub_record(1, true);
    record.title = String::new();
    assert_eq!(output::display_title(&record), "Untitled");

    record.title = "<i>La Grenouillère</i>".to_string();
    assert_eq!(output::display_title(&record), "La Grenouillère");

    record.title = "Dish with design <br/>of flowers".to_string();
    assert_eq!(output::display_title(&record), "Dish with design of flowers");

    record.title = "<b></b>".to_string();
    assert_eq!(output::display_title(&record), "Untitled");
}

#[test]
fn strip_markup_decodes_common_entities() {
    assert_eq!(
        crate::utils::strip_markup("Saint George &amp; the Dragon"),
        "Saint George & the Dragon"
    );
    assert_eq!(crate::utils::strip_markup("  plain  "), "plain");
}

#[test]
fn truncate_ellipsis_limits_width() {
    assert_eq!(crate::utils::truncate_ellipsis("short", 10), "short");
    assert_eq!(crate::utils::truncate_ellipsis("exactly-10", 10), "exactly-10");
    assert_eq!(crate::utils::truncate_ellipsis("much too long", 8), "much to…");
    assert_eq!(crate::utils::truncate_ellipsis("anything", 0), "");
}

#[test]
fn detail_lines_omit_absent_fields() {
    let mut record = stub_record(1, true);
    record.department = "Asian Art".to_string();
    record.medium = String::new();
    record.culture = String::new();
    record.period = String::new();
    record.credit_line = String::new();

    let lines = output::detail_lines(&record);
    assert!(lines.iter().any(|l| l == "Asian Art"));
    assert!(!lines.iter().any(|l| l.starts_with("Origin:")));
    assert!(!lines.iter().any(|l| l.starts_with("Technique:")));

    record.medium = "Porcelain".to_string();
    record.culture = "China".to_string();
    let lines = output::detail_lines(&record);
    assert!(lines.iter().any(|l| l == "Technique: Porcelain."));
    assert!(lines.iter().any(|l| l == "Origin: China."));
}

#[test]
fn page_footer_marks_disabled_controls() {
    let single = output::page_footer(1, 1);
    assert!(single.contains("page 1/1"));
    assert!(!single.contains("< prev"));
    assert!(!single.contains("next >"));

    let middle = output::page_footer(2, 4);
    assert!(middle.contains("< prev"));
    assert!(middle.contains("next >"));

    let last = output::page_footer(4, 4);
    assert!(last.contains("< prev"));
    assert!(!last.contains("next >"));
}

#[test]
fn display_mode_parses_and_toggles() {
    assert_eq!(DisplayMode::parse("grid"), Some(DisplayMode::Grid));
    assert_eq!(DisplayMode::parse("LIST"), Some(DisplayMode::List));
    assert_eq!(DisplayMode::parse("mosaic"), None);
    assert_eq!(DisplayMode::Grid.toggled(), DisplayMode::List);
    assert_eq!(DisplayMode::List.toggled(), DisplayMode::Grid);
}

#[test]
fn output_format_parse_and_inference() {
    assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
    assert_eq!(OutputFormat::parse("txt"), Some(OutputFormat::Text));
    assert_eq!(OutputFormat::parse("yaml"), None);
    assert_eq!(
        output::infer_format_from_path("./page.JSON"),
        Some(OutputFormat::Json)
    );
    assert_eq!(
        output::infer_format_from_path("./page.txt"),
        Some(OutputFormat::Text)
    );
    assert_eq!(output::infer_format_from_path("./page.out"), None);
}

#[test]
fn id_set_normalization_maps_null_ids_to_empty() {
    let raw: crate::api::IdSetResponse =
        serde_json::from_str(r#"{"total":0,"objectIDs":null}"#).unwrap();
    let set = crate::api::normalize_id_set(raw);
    assert!(set.ids.is_empty());
    assert_eq!(set.total, 0);

    let raw: crate::api::IdSetResponse =
        serde_json::from_str(r#"{"objectIDs":[5,7,9]}"#).unwrap();
    let set = crate::api::normalize_id_set(raw);
    assert_eq!(set.ids, vec![5, 7, 9]);
    assert_eq!(set.total, 3);
}

#[test]
fn object_record_deserializes_the_wire_shape() {
    let json = r#"{
        "objectID": 45734,
        "department": "Asian Art",
        "title": "Quail and Millet",
        "artistDisplayName": "Kiyohara Yukinobu",
        "objectDate": "late 17th century",
        "primaryImage": "https://images.example/45734.jpg",
        "primaryImageSmall": "https://images.example/45734-small.jpg",
        "medium": "Hanging scroll; ink and color on silk",
        "culture": "Japan",
        "period": "Edo period",
        "creditLine": "Purchase, Friends of Asian Art Gifts, 2015",
        "isHighlight": false
    }"#;
    let record: ObjectRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.object_id, 45734);
    assert_eq!(record.artist_display_name, "Kiyohara Yukinobu");
    assert!(record.has_thumbnail());

    let record: ObjectRecord = serde_json::from_str(r#"{"objectID": 12}"#).unwrap();
    assert_eq!(record.object_id, 12);
    assert!(record.title.is_empty());
    assert!(!record.has_thumbnail());
}

#[test]
fn validation_requires_a_department_for_paging() {
    let args = CliArgs::parse_from(["metbrowse", "--page", "2"]);
    assert!(validation::validate(&args).is_err());

    let args = CliArgs::parse_from(["metbrowse", "-d", "6", "--page", "2"]);
    assert!(validation::validate(&args).is_ok());

    let args = CliArgs::parse_from(["metbrowse", "-d", "6", "--page", "0"]);
    assert!(validation::validate(&args).is_err());
}

#[test]
fn validation_rejects_conflicting_views() {
    let args = CliArgs::parse_from(["metbrowse", "-d", "6", "--object", "1", "--interactive"]);
    assert!(validation::validate(&args).is_err());

    let args = CliArgs::parse_from(["metbrowse", "--object", "1"]);
    assert!(validation::validate(&args).is_ok());
}
