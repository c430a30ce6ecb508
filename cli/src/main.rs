use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use image_convert::cli::Cli;
use image_convert::report::Report;
use image_convert_core::converter::Converter;
use image_convert_core::extension::Extension;

fn main() {
    let cli = Cli::parse();

    // Init logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(&cli) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let encode = cli.encode_options();
    let decode = cli.decode_options();

    let converter = Converter::builder()
        .input(&cli.source)
        .output(&cli.target)
        .from(Extension::with_options(cli.from, encode.clone(), decode.clone()))
        .to(Extension::with_options(cli.to, encode, decode))
        .naming(cli.naming())
        .recursive(cli.recursive)
        .build()
        .context("Invalid conversion settings")?;

    let files = converter
        .collect_input()
        .context("Failed to collect input files")?;

    if files.is_empty() {
        anyhow::bail!(
            "no {} files found in {}",
            cli.from,
            cli.source.display()
        );
    }

    if cli.dry_run {
        println!("[dry-run] Would convert:");
        for (input, output) in converter.plan(&files) {
            println!("  {} → {}", input.display(), output.display());
        }
        return Ok(());
    }

    println!("Converting {} file(s) from {} to {}...", files.len(), cli.from, cli.to);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("█▓░"),
    );

    let mut report = Report::new();
    let converted = converter.convert_with(&files, |c| {
        pb.set_message(
            c.output
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        pb.inc(1);
    });

    let converted = match converted {
        Ok(converted) => converted,
        Err(e) => {
            pb.abandon();
            return Err(e).context("Conversion aborted");
        }
    };

    pb.finish_with_message("Done!");
    for c in converted {
        report.add(c);
    }
    report.print_summary();

    Ok(())
}
