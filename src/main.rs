//! CLI deckstate
//!
//! Кодирует документ колоды в URL-безопасную строку, восстанавливает его
//! обратно и строит документ из параметров адресной строки.

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use deckstate::{
    decode_flags, encode_named_flags,
    logging::{init_logging, LogFormat, LoggingConfig},
    parse_int_truthy, CodecConfig, CorruptDataError, Document, DocumentError, DocumentSerializer,
    ErrorExt, LogLevel, PaddingPolicy, QueryParameterLoader,
};
use tracing::{debug, error, info, warn};

/// Уровень логов CLI, если не задан ни флагом, ни окружением.
const DEFAULT_CLI_LOG_LEVEL: &str = "warn";

/// Основная структура CLI аргументов
#[derive(Parser)]
#[command(name = "deckstate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Encode and decode flashcard deck state strings", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Уровень логирования (по умолчанию `DECKSTATE_LOG_LEVEL` или warn)
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Формат логов (по умолчанию `DECKSTATE_LOG_FORMAT` или compact)
    #[arg(long, value_enum, global = true)]
    log_format: Option<CliLogFormat>,
    /// Подкоманда для выполнения
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum CliLogFormat {
    Compact,
    Pretty,
    Json,
}

/// Подкоманды CLI
#[derive(Subcommand)]
enum Commands {
    /// JSON-документ -> строка
    Encode {
        /// Файл с JSON (по умолчанию stdin)
        file: Option<PathBuf>,
        /// Уровень сжатия 0..=9
        #[arg(long)]
        level: Option<u32>,
        /// Не дописывать `=` в конце строки
        #[arg(long)]
        strip_padding: bool,
    },
    /// Строка -> JSON-документ
    Decode {
        /// Строка состояния (по умолчанию stdin)
        text: Option<String>,
        /// Требовать зарезервированные записи `?` и `#`
        #[arg(long)]
        validate: bool,
        /// Печатать JSON в одну строку
        #[arg(long)]
        compact: bool,
    },
    /// Параметры запроса или полный URL -> документ
    Query {
        /// `cards=a,b&isRandomized=1` или `https://host/page?cards=a`
        input: String,
        /// Сразу закодировать документ в строку
        #[arg(long)]
        encode: bool,
    },
    /// Битовое поле настроек <-> имена флагов
    Flags {
        /// Целое для декодирования
        value: Option<u64>,
        /// Флаг для кодирования: `name=1`
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },
}

impl From<CliLogFormat> for LogFormat {
    fn from(f: CliLogFormat) -> Self {
        match f {
            CliLogFormat::Compact => LogFormat::Compact,
            CliLogFormat::Pretty => LogFormat::Pretty,
            CliLogFormat::Json => LogFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: DEFAULT_CLI_LOG_LEVEL.to_string(),
        ..LoggingConfig::default()
    }
    .layered(cli.log_level.as_deref(), cli.log_format.map(Into::into));
    init_logging(logging).context("Failed to initialize logging")?;

    let config = CodecConfig::load().context("Failed to load configuration")?;
    debug!(?config, "Codec configuration loaded");

    match run(cli.command, config) {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            let code = report_failure(&e);
            eprintln!("Error: {e:#}");
            if let Some(hint) = recovery_hint(&e) {
                eprintln!("Hint: {hint}");
            }
            std::process::exit(code);
        }
    }
}

/// Ошибка библиотеки в цепочке причин, если она там есть.
fn library_error(err: &anyhow::Error) -> Option<&dyn ErrorExt> {
    err.chain().find_map(|cause| {
        cause
            .downcast_ref::<CorruptDataError>()
            .map(|e| e as &dyn ErrorExt)
            .or_else(|| cause.downcast_ref::<DocumentError>().map(|e| e as &dyn ErrorExt))
    })
}

fn recovery_hint(err: &anyhow::Error) -> Option<&'static str> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CorruptDataError>())
        .and_then(CorruptDataError::recovery_hint)
}

/// Пишет ошибку в лог на уровне её статус-кода и возвращает код выхода:
/// `2` для плохого ввода, `1` для остального.
fn report_failure(err: &anyhow::Error) -> i32 {
    let Some(e) = library_error(err) else {
        error!(error = %err, "Command failed");
        return 1;
    };

    let code = e.status_code();
    let kind = e.type_name();
    let details = e.log_message();
    match code.log_level() {
        LogLevel::Debug => debug!(kind = %kind, code = %code, "{details}"),
        LogLevel::Info => info!(kind = %kind, code = %code, "{details}"),
        LogLevel::Warn => warn!(kind = %kind, code = %code, "{details}"),
        LogLevel::Error => error!(kind = %kind, code = %code, "{details}"),
    }

    if code.is_client_error() {
        2
    } else {
        1
    }
}

fn run(
    command: Commands,
    mut config: CodecConfig,
) -> Result<String> {
    match command {
        Commands::Encode {
            file,
            level,
            strip_padding,
        } => {
            if let Some(level) = level {
                config.compression_level = level;
            }
            if strip_padding {
                config.padding = PaddingPolicy::Strip;
            }
            config.validate()?;

            let json = match file {
                Some(path) => fs::read_to_string(&path)
                    .with_context(|| format!("Cannot read {}", path.display()))?,
                None => read_stdin()?,
            };
            let document: Document =
                serde_json::from_str(&json).context("Input is not a deck document")?;
            Ok(DocumentSerializer::new(&config).save(&document))
        }
        Commands::Decode {
            text,
            validate,
            compact,
        } => {
            config.validate()?;
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            let document = DocumentSerializer::new(&config).load(&text).map_err(|e| {
                let msg = e.client_message();
                anyhow::Error::new(e).context(msg)
            })?;
            if validate {
                document.validate()?;
            }
            to_json(&document, compact)
        }
        Commands::Query { input, encode } => {
            let loader = if input.contains("://") {
                QueryParameterLoader::from_url(&input)
            } else {
                QueryParameterLoader::from_query(&input)
            };
            let document = loader.load();
            if encode {
                config.validate()?;
                Ok(DocumentSerializer::new(&config).save(&document))
            } else {
                to_json(&document, false)
            }
        }
        Commands::Flags { value, set } => match (value, set.is_empty()) {
            (Some(value), true) => to_json(&decode_flags(value), false),
            (None, false) => {
                let pairs = set
                    .iter()
                    .map(String::as_str)
                    .map(parse_flag_assignment)
                    .collect::<Result<Vec<_>>>()?;
                Ok(encode_named_flags(pairs).to_string())
            }
            _ => bail!("Pass either a flags integer or one or more --set NAME=VALUE"),
        },
    }
}

/// Разбирает `name=value`; значение читается как в параметрах запроса.
fn parse_flag_assignment(item: &str) -> Result<(&str, bool)> {
    let (name, value) = item
        .split_once('=')
        .with_context(|| format!("Expected NAME=VALUE, got '{item}'"))?;
    Ok((name, parse_int_truthy(value).unwrap_or(false)))
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("Cannot read stdin")?;
    Ok(buf)
}

fn to_json<T: serde::Serialize>(
    value: &T,
    compact: bool,
) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Тест проверяет, что ошибка загрузки находится под контекстом
    /// anyhow и даёт подсказку и код выхода плохого ввода.
    #[test]
    fn test_corrupt_state_is_reported_as_bad_input() {
        let load_err = DocumentSerializer::default()
            .load("not-valid-base64!!")
            .unwrap_err();
        let err = anyhow::Error::new(load_err).context("The saved state could not be restored");

        let found = library_error(&err).expect("library error in chain");
        assert_eq!(found.type_name(), "CorruptDataError");
        assert!(found.log_message().contains("Hint:"));
        assert!(recovery_hint(&err).is_some());
        assert_eq!(report_failure(&err), 2);
    }

    #[test]
    fn test_document_error_has_no_hint() {
        let err = anyhow::Error::from(Document::empty().validate().unwrap_err());
        assert_eq!(library_error(&err).unwrap().type_name(), "DocumentError");
        assert!(recovery_hint(&err).is_none());
        assert_eq!(report_failure(&err), 2);
    }

    #[test]
    fn test_other_errors_exit_with_one() {
        let err = anyhow::anyhow!("Cannot read stdin");
        assert!(library_error(&err).is_none());
        assert_eq!(report_failure(&err), 1);
    }

    #[test]
    fn test_parse_flag_assignment() {
        assert_eq!(
            parse_flag_assignment("isRandomized=1").unwrap(),
            ("isRandomized", true)
        );
        assert_eq!(parse_flag_assignment("allowCardDup=x").unwrap(), ("allowCardDup", false));
        assert!(parse_flag_assignment("isRandomized").is_err());
    }
}
