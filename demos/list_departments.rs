use std::error::Error;

use metbrowse::runner::{Gallery, Options};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let gallery = Gallery::new(Options::default())?;
    for department in gallery.departments().await? {
        println!("{} {}", department.department_id, department.display_name);
    }
    Ok(())
}
