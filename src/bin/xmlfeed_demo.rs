use std::env;
use std::error::Error;

use xmlfeed::cli::OutputArgs;
use xmlfeed::{LeafFormat, TargetWriter, WriterError};

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  xmlfeed_demo [--compact] [--append | --create-new] [--encoding <label>] [--no-header] [output]");
    eprintln!();
    eprintln!("Output tokens:");
    eprintln!("  - | stdout         Write to stdout (default)");
    eprintln!("  stderr             Write to stderr");
    eprintln!("  temp[:<prefix>]    Write to a new temporary file");
    eprintln!("  @<path>            Force treating value as a file path");
}

struct Size {
    name: &'static str,
    price: f64,
}

fn write_product(
    w: &mut TargetWriter,
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    quantity: u32,
    sizes: &[Size],
) -> Result<(), WriterError> {
    w.element("product", |w| {
        w.leaf("name", name)?;
        w.leaf("description", description)?;
        w.leaf_with("price", price, LeafFormat::new().decimals(2))?;
        w.leaf("category", category)?;
        w.leaf("quantity", quantity)?;

        if sizes.is_empty() {
            return Ok(());
        }
        w.element("sizes", |w| {
            for size in sizes {
                w.element("size", |w| {
                    w.leaf("size_name", size.name)?;
                    w.leaf_with("size_price", size.price, LeafFormat::new().decimals(2))
                })?;
            }
            Ok(())
        })
    })
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = OutputArgs::new();
    let mut it = env::args().skip(1);

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--compact" => args = args.with_compact(),
            "--append" => args = args.with_append(),
            "--create-new" => args = args.with_create_new(),
            "--no-header" => args.no_header = true,
            "--encoding" => {
                let label = it.next().ok_or("--encoding requires a label")?;
                args = args.with_encoding(label);
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            _ if args.output.is_none() => args = args.with_output(arg.clone()),
            _ => return Err(format!("unexpected argument '{arg}'").into()),
        }
    }

    let mut writer = args.open_writer()?;
    let id = writer.id().to_string();

    writer.element("products", |w| {
        write_product(
            w,
            "Breakfast white mug",
            "Nice white mug used for breakfast",
            5.00,
            "Mugs|Breakfast",
            20,
            &[],
        )?;
        write_product(
            w,
            "Puma T-shirt",
            "Puma t-shirt with some sizes",
            10.00,
            "T-shirts|Puma",
            10,
            &[
                Size { name: "S", price: 10.00 },
                Size { name: "M", price: 11.00 },
                Size { name: "L", price: 13.00 },
            ],
        )
    })?;
    writer.close()?;

    if !args.is_stdout() {
        eprintln!("xmlfeed_demo: wrote {id}");
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("xmlfeed_demo error: {e}");
        print_usage();
        std::process::exit(1);
    }
}
