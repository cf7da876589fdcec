use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[arg(help = "The WSDL or XSD source file or URL")]
    pub input: String,

    #[arg(long, help = "Allow a XML Document Type Definition (DTD) to occur")]
    pub allow_dtd: bool,

    #[arg(long, value_name = "URL", help = "Proxy used when fetching remote documents")]
    pub proxy: Option<String>,

    #[arg(
        long = "header",
        value_name = "NAME: VALUE",
        help = "Additional HTTP header sent when fetching remote documents"
    )]
    pub headers: Vec<String>,
}
