use clap::Parser;
use photo_filter::cli::Cli;

fn main() {
    let cli = Cli::parse();
    photo_filter::init_logger(cli.verbose);

    if cli.list_cameras {
        photo_filter::list_cameras();
        return;
    }

    if let Err(e) = photo_filter::run(cli) {
        log::error!("{e:?}");
        std::process::exit(1);
    }
}
