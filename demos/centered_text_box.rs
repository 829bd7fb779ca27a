use clap::Parser;
use folio::document::{default_registry, DOCUMENT, EMERSON_QUOTE, PDF};
use folio::{FolioError, OptionsContext, RenderRequest};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Renders a quote into a centered PDF text box",
    long_about = None
)]
struct Args {
    /// Portrait drawn above the quote
    #[arg(long)]
    image: Option<PathBuf>,

    /// Where to write the PDF
    #[arg(long, default_value = "centered_text_box.pdf")]
    output: PathBuf,

    #[arg(long, default_value = "a good quote")]
    heading: String,
}

fn main() -> Result<(), FolioError> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "folio=info,folio_render_core=info");
        }
    }
    env_logger::init();

    let args = Args::parse();
    let registry = default_registry().install()?;
    println!("✓ Formatters registered: {:?}", registry);

    let mut request = RenderRequest::new(&DOCUMENT, PDF)
        .option("heading", args.heading.as_str())
        .option("author", "Ralph Waldo Emerson")
        .customize(|o: &mut OptionsContext| {
            o.set("text", EMERSON_QUOTE);
        });
    if let Some(image) = &args.image {
        request = request.option("image", image.to_string_lossy().into_owned());
    }

    let pdf = request.render(registry)?;
    fs::write(&args.output, pdf.as_bytes())?;

    println!("\nSuccess! Generated {}", args.output.display());
    Ok(())
}
