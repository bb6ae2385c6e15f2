use anyhow::{Result, bail};
use clap::Parser;
use log::{debug, info};
use sspm_txt::{
    Args, ExportFormat, default_output_path, ensure_sspm_extension, export_json_file,
    export_txt_file, import_sspm_file, parse_format,
};

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let format = parse_format(&args.format);

    if !args.force {
        ensure_sspm_extension(&args.input)?;
    }

    info!(
        "Importing SSPM file: '{}' at speed {}...",
        args.input.display(),
        args.speed
    );
    let chart = import_sspm_file(&args.input, args.speed)?;

    debug!(
        "Imported map '{}' ({}) by [{}] with {} notes..!",
        chart.map_name,
        chart.map_id,
        chart.mappers.replace('\n', ", "),
        chart.notes.len()
    );

    if args.dry_run {
        info!("Previewing at most {} notes..!", args.dry_run_max);
        for (i, note) in chart.notes.iter().take(args.dry_run_max).enumerate() {
            info!(
                "Note {}: x={} y={} time_ms={}",
                i, note.x, note.y, note.timestamp_ms
            );
        }
        return Ok(());
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, format));

    if output == args.input {
        bail!(
            "Refusing to overwrite the input file '{}'..!",
            output.display()
        );
    }

    match format {
        ExportFormat::Txt => export_txt_file(&chart, &output)?,
        ExportFormat::Json => export_json_file(&chart, &output)?,
    }

    info!(
        "Converted {} notes and saved to: '{}'..!",
        chart.notes.len(),
        output.display()
    );

    Ok(())
}
