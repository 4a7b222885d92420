use std::io::Write;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::fs::OpenOptions;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::api::ObjectRecord;
use crate::catalog;
use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::output::{self, DisplayMode, OutputFormat};
use crate::runner::{Gallery, Options};
use crate::view::ViewState;

const IDS_PER_PAGE: usize = 100;
const GRID_COLUMNS: usize = 3;

fn print_banner() {
    const BANNER: &str = r#"
                 _   _
  _ __ ___   ___| |_| |__  _ __ _____      _____  ___
 | '_ ` _ \ / _ \ __| '_ \| '__/ _ \ \ /\ / / __|/ _ \
 | | | | | |  __/ |_| |_) | | | (_) \ V  V /\__ \  __/
 |_| |_| |_|\___|\__|_.__/|_|  \___/ \_/\_/ |___/\___|
       v0.2.0 - terminal browser for the Met collection
    "#;
    print!("{}", BANNER);
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

#[derive(Clone, Debug)]
struct RunConfig {
    list_departments: bool,
    department: Option<u32>,
    object: Option<u64>,
    page: usize,
    interactive: bool,
    ids_only: bool,
    with_images: bool,
    mode: DisplayMode,
    items_per_page: usize,
    timeout: u64,
    rate: u32,
    api_base: String,
    output: Option<String>,
    output_format: Option<String>,
    no_color: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = args.no_color || cfg.no_color.unwrap_or(false);

    let items_per_page = args.items_per_page.or(cfg.items_per_page).unwrap_or(9);
    if items_per_page == 0 {
        return Err("invalid items_per_page, expected positive integer".to_string());
    }
    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10);
    let rate = args.rate.or(cfg.rate).unwrap_or(50);
    if rate == 0 {
        return Err("invalid rate, expected positive integer".to_string());
    }

    let with_images = args.with_images || cfg.with_images.unwrap_or(false);
    let api_base = args
        .api_base
        .or(cfg.api_base)
        .unwrap_or_else(|| crate::api::DEFAULT_API_BASE.to_string());

    let mode_raw = args.mode.or(cfg.mode).unwrap_or_else(|| "grid".to_string());
    let mode = DisplayMode::parse(&mode_raw)
        .ok_or_else(|| format!("invalid display mode '{mode_raw}', expected grid or list"))?;

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = args.output_format.or(cfg.output_format);
    if let Some(format) = output_format.as_deref() {
        if OutputFormat::parse(format).is_none() {
            return Err(format!(
                "invalid output format '{format}', expected text or json"
            ));
        }
    }

    Ok(RunConfig {
        list_departments: args.departments,
        department: args.department,
        object: args.object,
        page: args.page.unwrap_or(1),
        interactive: args.interactive,
        ids_only: args.ids,
        with_images,
        mode,
        items_per_page,
        timeout,
        rate,
        api_base,
        output,
        output_format,
        no_color,
    })
}

fn fetch_bar(message: String) -> Result<ProgressBar, String> {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(200));
    pb.set_style(
        ProgressStyle::with_template(":: {spinner} {msg}")
            .map_err(|e| format!("failed to build progress bar style: {e}"))?,
    );
    pb.set_message(message);
    Ok(pb)
}

fn batch_bar(message: String) -> Result<ProgressBar, String> {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(200));
    pb.set_style(
        ProgressStyle::with_template(":: {spinner} fetching objects [{pos}] {msg}")
            .map_err(|e| format!("failed to build progress bar style: {e}"))?,
    );
    pb.set_message(message);
    Ok(pb)
}

fn print_page(records: &[ObjectRecord], mode: DisplayMode, current_page: usize, total_pages: usize) {
    if records.is_empty() {
        println!("{}", output::EMPTY_STATE.yellow());
    } else {
        let lines = match mode {
            DisplayMode::Grid => output::grid_lines(records, GRID_COLUMNS),
            DisplayMode::List => output::list_lines(records),
        };
        for line in lines {
            println!("{line}");
        }
    }
    println!();
    println!("{}", output::page_footer(current_page, total_pages).bold());
}

async fn write_records(
    path: &str,
    format: Option<&str>,
    records: &[ObjectRecord],
) -> Result<(), String> {
    let format = format
        .and_then(OutputFormat::parse)
        .or_else(|| output::infer_format_from_path(path))
        .unwrap_or(OutputFormat::Text);

    let rendered = match format {
        OutputFormat::Text => output::render_text(records),
        OutputFormat::Json => output::render_json(records),
    };

    let mut outfile = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .await
        .map_err(|e| format!("failed to open output file: {e}"))?;
    outfile
        .write_all(&rendered)
        .await
        .map_err(|_| "failed to write output file".to_string())?;
    Ok(())
}

async fn list_departments(gallery: &Gallery) -> Result<(), String> {
    let pb = fetch_bar("loading departments".to_string())?;
    let departments = gallery.departments().await;
    pb.finish_and_clear();
    let departments = departments.map_err(|e| e.to_string())?;
    for line in output::department_lines(&departments) {
        println!("{line}");
    }
    Ok(())
}

async fn show_object(
    gallery: &Gallery,
    object_id: u64,
    out: Option<&str>,
    format: Option<&str>,
) -> Result<(), String> {
    let pb = fetch_bar(format!("loading object {object_id}"))?;
    let record = gallery.object(object_id).await;
    pb.finish_and_clear();
    let record = record.map_err(|e| e.to_string())?;
    for line in output::detail_lines(&record) {
        println!("{line}");
    }
    if let Some(path) = out {
        write_records(path, format, std::slice::from_ref(&record)).await?;
        println!();
        println!(":: record written to {path}");
    }
    Ok(())
}

async fn list_object_ids(gallery: &Gallery, department_id: u32, page: usize) -> Result<(), String> {
    let pb = fetch_bar(format!("loading department {department_id}"))?;
    let id_set = gallery.object_ids(department_id).await;
    pb.finish_and_clear();
    let id_set = id_set.map_err(|e| e.to_string())?;

    let total_pages = catalog::page_count(id_set.ids.len(), IDS_PER_PAGE);
    if page == 0 || page > total_pages {
        return Err(format!("page {page} is out of range (1-{total_pages})"));
    }
    let (start, end) = catalog::page_window(page, IDS_PER_PAGE);
    let end = end.min(id_set.ids.len());
    for chunk in id_set.ids[start..end].chunks(10) {
        println!(
            "{}",
            chunk
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );
    }
    println!();
    println!("{}", output::page_footer(page, total_pages).bold());
    Ok(())
}

async fn show_page(
    gallery: &Gallery,
    department_id: u32,
    page: usize,
    mode: DisplayMode,
    out: Option<&str>,
    format: Option<&str>,
) -> Result<(), String> {
    let pb = fetch_bar(format!("loading department {department_id} page {page}"))?;
    let result = gallery.department_page(department_id, page).await;
    pb.finish_and_clear();
    let dept_page = result.map_err(|e| e.to_string())?;

    print_page(
        &dept_page.records,
        mode,
        dept_page.current_page,
        dept_page.total_pages,
    );
    if let Some(path) = out {
        write_records(path, format, &dept_page.records).await?;
        println!(":: records written to {path}");
    }
    Ok(())
}

async fn reload_records(gallery: &Gallery, view: &mut ViewState) -> Result<(), String> {
    let ids = view.ids().to_vec();
    let token = view.begin_load();
    let pb = batch_bar(format!("page {}", view.current_page()))?;
    let client = gallery.client();
    let records = catalog::load_page(&ids, view.current_page(), view.items_per_page(), |id| {
        let pb = pb.clone();
        async move {
            let record = client.object(id).await;
            pb.inc(1);
            record
        }
    })
    .await;
    pb.finish_and_clear();
    let _ = view.apply_load(token, records);
    Ok(())
}

async fn browse_interactive(
    gallery: &Gallery,
    department_id: u32,
    mode: DisplayMode,
) -> Result<(), String> {
    let mut view = ViewState::new(department_id, gallery.options().items_per_page, mode);
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut dirty = true;

    loop {
        if view.needs_ids() {
            let pb = fetch_bar(format!("loading department {}", view.department_id()))?;
            let id_set = gallery.object_ids(view.department_id()).await;
            pb.finish_and_clear();
            view.set_ids(id_set.map_err(|e| e.to_string())?);
            dirty = true;
        }
        if dirty {
            reload_records(gallery, &mut view).await?;
            dirty = false;
        }

        println!();
        println!(
            "{}",
            format!(
                "department {} :: {} objects :: mode {}",
                view.department_id(),
                view.total_objects(),
                view.mode().label()
            )
            .bold()
        );
        print_page(
            view.records(),
            view.mode(),
            view.current_page(),
            view.total_pages(),
        );
        println!(
            "{}",
            ":: commands: n=next  p=prev  m=toggle mode  o <id>=open object  d <id>=switch department  q=quit"
                .dimmed()
        );
        print!("> ");
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(format!("failed to read command: {e}")),
        };
        let command = line.trim();
        let (verb, rest) = match command.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (command, ""),
        };

        match verb {
            "q" | "quit" => break,
            "n" | "next" => {
                if view.next() {
                    dirty = true;
                } else {
                    println!("{}", "already at the last page".yellow());
                }
            }
            "p" | "prev" => {
                if view.previous() {
                    dirty = true;
                } else {
                    println!("{}", "already at the first page".yellow());
                }
            }
            "m" | "mode" => {
                view.toggle_mode();
            }
            "o" | "open" => match rest.parse::<u64>() {
                Ok(object_id) => {
                    let pb = fetch_bar(format!("loading object {object_id}"))?;
                    let record = gallery.object(object_id).await;
                    pb.finish_and_clear();
                    match record {
                        Ok(record) => {
                            println!();
                            for detail in output::detail_lines(&record) {
                                println!("{detail}");
                            }
                        }
                        Err(e) => println!("{}", e.to_string().red()),
                    }
                }
                Err(_) => println!("{}", "usage: o <object id>".yellow()),
            },
            "d" | "dept" => match rest.parse::<u32>() {
                Ok(new_department) => view.select_department(new_department),
                Err(_) => println!("{}", "usage: d <department id>".yellow()),
            },
            "" => {}
            _ => println!("{}", "unknown command (n, p, m, o <id>, d <id>, q)".yellow()),
        }
    }

    Ok(())
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    print_banner();

    let gallery = Gallery::new(Options {
        api_base: run.api_base.clone(),
        items_per_page: run.items_per_page,
        timeout_seconds: run.timeout,
        rate: run.rate,
        prefilter_images: run.with_images,
    })
    .map_err(|e| e.to_string())?;

    if let Some(object_id) = run.object {
        return show_object(
            &gallery,
            object_id,
            run.output.as_deref(),
            run.output_format.as_deref(),
        )
        .await;
    }

    let department_id = match run.department {
        Some(id) if !run.list_departments => id,
        _ => return list_departments(&gallery).await,
    };

    if run.ids_only {
        return list_object_ids(&gallery, department_id, run.page).await;
    }

    format_kv_line(
        "Target",
        &format!("department {department_id} (page {})", run.page),
    );
    format_kv_line(
        "Browse",
        &format!(
            "mode={} items_per_page={} with_images={}",
            run.mode.label(),
            run.items_per_page,
            run.with_images
        ),
    );
    format_kv_line(
        "HTTP",
        &format!(
            "rate={} timeout={}s api={}",
            run.rate,
            run.timeout,
            gallery.client().api_base()
        ),
    );
    println!();

    if run.interactive {
        browse_interactive(&gallery, department_id, run.mode).await
    } else {
        show_page(
            &gallery,
            department_id,
            run.page,
            run.mode,
            run.output.as_deref(),
            run.output_format.as_deref(),
        )
        .await
    }
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    if args.init_config {
        let path = config::default_config_path()
            .ok_or_else(|| "could not determine home directory".to_string())?;
        config::ensure_default_config_file(&path)?;
        println!(":: wrote default config to {}", path.display());
        return Ok(());
    }

    let cfg = match args.config.as_ref() {
        Some(path) => config::load_config(&config::expand_tilde(path), false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}
