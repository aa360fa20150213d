use clap::Parser;
use kb_table_upload::app;
use kb_table_upload::interfaces::cli::Cli;

#[actix_web::main]
async fn main() {
    let cli = Cli::parse();
    app::init_logging(cli.verbose, cli.quiet);

    if let Err(error) = app::run(cli).await {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
