mod cli;

use clap::Parser;

use wsdl_generator::codegen;
use wsdl_generator::wsdl::{self, FetchConfig, GeneratorError, LoadOptions, StreamFetcher, Type};

fn main() {
    let cli = cli::Cli::parse();
    if let Err(error) = run(&cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: &cli::Cli) -> Result<(), GeneratorError> {
    let mut config = FetchConfig {
        proxy: cli.proxy.clone(),
        headers: Vec::new(),
    };
    for header in &cli.headers {
        let Some((name, value)) = header.split_once(':') else {
            return Err(GeneratorError::Load {
                location: "fetch configuration".to_string(),
                reason: format!("header {header:?} is not of the form NAME: VALUE"),
            });
        };
        config
            .headers
            .push((name.trim().to_string(), value.trim().to_string()));
    }

    let fetcher = StreamFetcher::new(&config)?;
    let generation = wsdl::load_service(
        &cli.input,
        &fetcher,
        LoadOptions {
            allow_dtd: cli.allow_dtd,
        },
    )?;

    if let Some(service) = &generation.service {
        println!("service {}", service.identifier());
        for operation in service.operations() {
            println!("  operation {}", operation.name);
        }
    }

    for class in codegen::build_classes(&generation.catalog)? {
        let extends = class
            .extends()
            .map(|base| format!(" extends {base}"))
            .unwrap_or_default();
        let implements = if class.implements().is_empty() {
            String::new()
        } else {
            format!(" implements {}", class.implements().join(", "))
        };
        println!("class {}{extends}{implements}", class.name());

        if let Some(Type::Enum(record)) = generation.catalog.lookup(class.name()) {
            println!("  valid values: {}", record.valid_values());
        }
        for constant in class.constants() {
            println!("  const {} = {}", constant.name, constant.value);
        }
        for field in class.fields() {
            let marker = if field.nullable { "?" } else { "" };
            println!(
                "  {} {}: {marker}{}",
                field.visibility.as_str(),
                field.name,
                field.type_name.as_deref().unwrap_or("anyType"),
            );
        }
    }

    Ok(())
}
