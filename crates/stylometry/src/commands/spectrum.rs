//! Spectrum command: show a file's vocabulary frequency spectrum.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use stylometry_core::{Measurer, VocabularySpectrum};

/// Arguments for the `spectrum` subcommand.
#[derive(Args, Debug)]
pub struct SpectrumArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,

    /// Also list the most frequent word-forms.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

#[derive(Serialize)]
struct SpectrumReport<'a> {
    file: &'a Utf8PathBuf,
    #[serde(flatten)]
    spectrum: &'a VocabularySpectrum,
    vocabulary_size: usize,
}

/// Print N, V and the frequency spectrum `V(i, N)` of a file.
#[instrument(name = "cmd_spectrum", skip_all, fields(file = %args.file))]
pub fn cmd_spectrum(
    args: SpectrumArgs,
    global_json: bool,
    measurer: &Measurer,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(top = ?args.top, "executing spectrum command");

    let content = super::read_input_file(&args.file, max_input)?;
    let document = measurer.document(content.as_str());
    let spectrum = document.spectrum();

    if global_json {
        let report = SpectrumReport {
            file: &args.file,
            spectrum,
            vocabulary_size: spectrum.vocabulary_size(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", args.file.bold());
    println!("{}: {}", "Words (N)".dimmed(), spectrum.word_count());
    println!("{}: {}", "Vocabulary (V)".dimmed(), spectrum.vocabulary_size());
    println!();
    println!("{}", "Spectrum".bold().underline());
    println!("{:>8}  {:>8}  {:>8}", "i".dimmed(), "V(i,N)".dimmed(), "p".dimmed());
    for (&i, &forms) in spectrum.spectrum() {
        let p = spectrum.probabilities().get(&i).copied().unwrap_or(0.0);
        println!("{i:>8}  {forms:>8}  {p:>8.4}");
    }

    if let Some(n) = args.top {
        println!();
        println!("{}", "Most frequent".bold().underline());
        for (word, count) in most_frequent(spectrum, n) {
            println!("{count:>8}  {}", word.cyan());
        }
    }
    Ok(())
}

/// The `n` most frequent word-forms, ties broken alphabetically.
fn most_frequent(spectrum: &VocabularySpectrum, n: usize) -> Vec<(&str, usize)> {
    let mut words: Vec<(&str, usize)> = spectrum
        .counts()
        .iter()
        .map(|(word, &count)| (word.as_str(), count))
        .collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    words.truncate(n);
    words
}
