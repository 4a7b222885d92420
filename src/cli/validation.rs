use crate::cli::args::CliArgs;
use crate::output::{DisplayMode, OutputFormat};

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(0) = args.items_per_page {
        return Err("invalid --items-per-page, expected positive integer".to_string());
    }
    if let Some(0) = args.rate {
        return Err("invalid --rate, expected positive integer".to_string());
    }
    if let Some(0) = args.page {
        return Err("invalid --page, pages are numbered from 1".to_string());
    }
    if let Some(mode) = args.mode.as_deref() {
        if DisplayMode::parse(mode).is_none() {
            return Err(format!("invalid --mode '{mode}', expected grid or list"));
        }
    }
    if let Some(format) = args.output_format.as_deref() {
        if OutputFormat::parse(format).is_none() {
            return Err(format!(
                "invalid --output-format '{format}', expected text or json"
            ));
        }
    }
    if (args.page.is_some() || args.interactive || args.ids) && args.department.is_none() {
        return Err("--page, --interactive and --ids require --department".to_string());
    }
    if args.object.is_some() && args.interactive {
        return Err("use either --object or --interactive, not both".to_string());
    }
    Ok(())
}
