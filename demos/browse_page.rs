use std::error::Error;

use metbrowse::runner::{Gallery, Options};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let gallery = Gallery::new(Options {
        items_per_page: 6,
        rate: 20,
        ..Options::default()
    })?;

    let page = gallery.department_page(6, 1).await?;
    println!(
        "page {}/{} ({} objects in the department)",
        page.current_page, page.total_pages, page.total_objects
    );
    for record in page.records.iter() {
        println!("{} {}", record.object_id, record.title);
    }

    Ok(())
}
