use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand, ValueEnum};
use itertools::Itertools;
use tracing::error;
use tracing_subscriber::EnvFilter;
use worksheet::{
    analysis::{dok_analysis, topic_analysis, type_analysis, Analysis},
    export::{export, ExportFormat, ExportSettings},
    filter::FilterCriteria,
    notation::{parse_notation, Segment},
    question::{format_question_type, Question, QuestionBank},
    selection::Selection,
    Error, Result,
};

#[derive(Parser)]
#[command(version, about = "Build math practice worksheets from a question bank")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show how `^` and `_` markup in a text is split up
    Parse { text: String },
    /// List the questions in a bank, optionally filtered
    List {
        /// Question bank (JSON array of questions)
        bank: PathBuf,
        #[arg(long, default_value = "")]
        standard: String,
        #[arg(long, default_value = "")]
        objective: String,
        #[arg(long, default_value = "")]
        topic: String,
        #[arg(long, default_value = "")]
        keyword: String,
    },
    /// Write a worksheet for the selected questions
    Export {
        /// Question bank (JSON array of questions)
        bank: PathBuf,
        /// Question ids, in worksheet order
        #[arg(long, required = true, num_args = 1.., value_delimiter = ',')]
        select: Vec<String>,
        #[arg(long, default_value = "Math Practice")]
        title: String,
        #[arg(long, value_enum, default_value_t = Format::Pdf)]
        format: Format,
        /// Leave out the answer key
        #[arg(long)]
        no_answer_key: bool,
        /// Directory to write the worksheet to
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Pdf,
    Docx,
    Txt,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Pdf => ExportFormat::Pdf,
            Format::Docx => ExportFormat::Docx,
            Format::Txt => ExportFormat::Text,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Parse { text } => {
            for segment in parse_notation(Some(&text)) {
                match segment {
                    Segment::Literal(text) => println!("literal     {text:?}"),
                    Segment::Script(script) => {
                        let kind = format!("{:?}", script.kind).to_lowercase();
                        println!("{kind:<11} {:?}", script.content);
                    }
                }
            }
        }
        Command::List {
            bank,
            standard,
            objective,
            topic,
            keyword,
        } => {
            let bank = QuestionBank::from_path(bank)?;
            let options = bank.filter_options();
            println!("standards:  {}", options.standards.join(", "));
            println!("objectives: {}", options.objectives.join(", "));
            println!("topics:     {}", options.topics.join(", "));
            println!();

            let criteria = FilterCriteria {
                standard,
                learning_objective: objective,
                topic,
                keyword,
            };
            let questions = criteria.apply(&bank);
            println!("{} of {} questions match", questions.len(), bank.len());
            for question in questions {
                println!(
                    "{:>6}  [{}] {}",
                    question.id,
                    format_question_type(question.question_type.as_deref()),
                    question.text().unwrap_or(""),
                );
            }
        }
        Command::Export {
            bank,
            select,
            title,
            format,
            no_answer_key,
            out,
        } => {
            let bank = QuestionBank::from_path(bank)?;
            if let Some(missing) = select.iter().find(|id| bank.get(id).is_none()) {
                return Err(Error::UnknownQuestion(missing.clone()));
            }

            let selection = select.into_iter().collect::<Selection>();
            let questions = selection.resolve(&bank);
            print_analysis(&questions);

            let settings = ExportSettings {
                title,
                format: format.into(),
                include_answer_key: !no_answer_key,
            };
            let path = export(&questions, &settings)?.write_to(out)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn print_analysis(questions: &[&Question]) {
    println!("{} questions selected", questions.len());
    let rows = [
        ("DOK", dok_analysis(questions)),
        ("type", type_analysis(questions)),
        ("topic", topic_analysis(questions)),
    ];
    for (name, analysis) in rows {
        println!("{name:<6} {}", breakdown(&analysis));
    }
    println!();
}

fn breakdown(analysis: &Analysis) -> String {
    if analysis.total == 0 {
        return "-".to_owned();
    }
    analysis
        .breakdown
        .iter()
        .map(|entry| format!("{} {} ({:.1}%)", entry.label, entry.count, entry.percentage))
        .join(", ")
}
