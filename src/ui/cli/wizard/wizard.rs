use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use strum::{EnumMessage, IntoEnumIterator};

use crate::ui::cli::drivers::PromptDriver;
use crate::ui::types::choices::{FieldKind, FieldSpec, PathRules, UIChoice, schema_for, specs_for_kind};

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

fn kind_options<K>() -> (Vec<K>, Vec<String>)
where
    K: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator,
{
    K::iter()
        .map(|k| {
            let label = k.get_message().unwrap_or_else(|| k.into());
            let text = match k.get_detailed_message() {
                Some(desc) if !desc.is_empty() => format!("{label}  {DIM_ITALIC}{desc}{RESET}"),
                _ => label.to_string(),
            };
            (k, text)
        })
        .unzip()
}

/// Walks the user through picking a variant of `C` and filling its params.
pub fn prompt_choice<C: UIChoice, D: PromptDriver>(driver: &D) -> Result<C> {
    let (kinds, labels) = kind_options::<C::Kind>();
    let idx = driver.ask_select(C::prompt_label(), C::prompt_help(), &labels)?;
    let kind = *kinds.get(idx).context("selection out of range")?;

    let key: &'static str = kind.into();
    let specs = specs_for_kind(&schema_for::<C>(), key)?;
    let defaults = C::default_params(kind);

    let mut params = Map::new();
    for s in &specs {
        let init = s.default.clone().or_else(|| defaults.get(&s.name).cloned());
        if let Some(val) = prompt_field(driver, s, init)? {
            params.insert(s.name.clone(), val);
        }
    }

    if let Some(extra) = C::subprompts(driver, kind)? {
        params.extend(extra);
    }
    C::from_parts(kind, Value::Object(params))
}

fn prompt_field<D: PromptDriver>(
    driver: &D,
    s: &FieldSpec,
    init: Option<Value>,
) -> Result<Option<Value>> {
    let help = s.description.as_deref().unwrap_or("");

    if s.nullable {
        let def_txt = match &init {
            Some(Value::Null) | None => String::new(),
            Some(Value::String(t)) => t.clone(),
            Some(v) => v.to_string(),
        };
        let Some(answer) = driver.ask_optional(&s.title, help, &def_txt)? else {
            return Ok(None);
        };
        return parse_answer(s, &answer).map(Some);
    }

    let val = match s.kind {
        FieldKind::Boolean => {
            let def = init.and_then(|v| v.as_bool()).unwrap_or(false);
            Value::Bool(driver.ask_bool(&s.title, help, def)?)
        }
        FieldKind::String => {
            let def = init
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
            let answered = match &s.path {
                Some(rules) => {
                    let help = if help.is_empty() { "Please type a valid file path" } else { help };
                    prompt_path_until_ok(driver, &s.title, help, &def, rules)?
                        .to_string_lossy()
                        .into_owned()
                }
                None => driver.ask_string(&s.title, help, &def)?,
            };
            Value::String(answered)
        }
        FieldKind::Integer => {
            let def = init.and_then(|v| v.as_u64()).unwrap_or(0);
            Value::from(driver.ask_u64(
                &s.title,
                help,
                def,
                s.min.map(|x| x as u64),
                s.max.map(|x| x as u64),
            )?)
        }
        FieldKind::Number => {
            let def = init.and_then(|v| v.as_f64()).unwrap_or(0.0);
            Value::from(driver.ask_f64(&s.title, help, def, s.min, s.max)?)
        }
    };
    Ok(Some(val))
}

fn parse_answer(s: &FieldSpec, answer: &str) -> Result<Value> {
    Ok(match s.kind {
        FieldKind::Integer => Value::from(
            answer
                .parse::<u64>()
                .with_context(|| format!("invalid integer for {}", s.title))?,
        ),
        FieldKind::Number => Value::from(
            answer
                .parse::<f64>()
                .with_context(|| format!("invalid number for {}", s.title))?,
        ),
        FieldKind::Boolean => Value::Bool(
            answer
                .parse::<bool>()
                .with_context(|| format!("invalid boolean for {}", s.title))?,
        ),
        FieldKind::String => Value::String(answer.to_string()),
    })
}

fn validate_path_str(input: &str, rules: &PathRules) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Path cannot be empty".into());
    }
    let p = Path::new(trimmed);

    if rules.must_exist && !p.exists() {
        return Err(format!("Path does not exist: {}", p.display()));
    }
    if rules.must_be_file && p.exists() && !p.is_file() {
        return Err("Expected a file path, not a directory".into());
    }
    if !rules.extensions.is_empty() {
        let ok = p
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| rules.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
        if !ok {
            return Err(format!("Expected a .{} file", rules.extensions.join(" / .")));
        }
    }
    Ok(())
}

fn prompt_path_until_ok<D: PromptDriver>(
    driver: &D,
    title: &str,
    help: &str,
    default: &str,
    rules: &PathRules,
) -> Result<PathBuf> {
    loop {
        let answer = driver.ask_string(title, help, default)?;
        match validate_path_str(&answer, rules) {
            Ok(()) => return Ok(PathBuf::from(answer.trim())),
            Err(msg) => eprintln!("✗ {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::{FeedChoice, TaskChoice};
    use anyhow::anyhow;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io::Write;

    /// Replays canned answers; a blank numeric answer takes the default.
    struct ScriptedDriver {
        answers: RefCell<VecDeque<String>>,
    }

    impl ScriptedDriver {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().map(|s| s.to_string()).collect()),
            }
        }

        fn next(&self) -> Result<String> {
            self.answers
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| anyhow!("script exhausted"))
        }

        fn remaining(&self) -> usize {
            self.answers.borrow().len()
        }
    }

    impl PromptDriver for ScriptedDriver {
        fn ask_select(&self, _: &str, _: Option<&str>, options: &[String]) -> Result<usize> {
            let idx: usize = self.next()?.parse()?;
            assert!(idx < options.len());
            Ok(idx)
        }

        fn ask_bool(&self, _: &str, _: &str, default: bool) -> Result<bool> {
            let a = self.next()?;
            Ok(if a.is_empty() { default } else { a.parse()? })
        }

        fn ask_string(&self, _: &str, _: &str, _: &str) -> Result<String> {
            self.next()
        }

        fn ask_u64(&self, _: &str, _: &str, default: u64, _: Option<u64>, _: Option<u64>) -> Result<u64> {
            let a = self.next()?;
            Ok(if a.is_empty() { default } else { a.parse()? })
        }

        fn ask_f64(&self, _: &str, _: &str, default: f64, _: Option<f64>, _: Option<f64>) -> Result<f64> {
            let a = self.next()?;
            Ok(if a.is_empty() { default } else { a.parse()? })
        }
    }

    #[test]
    fn task_wizard_collects_nested_feed() {
        let driver = ScriptedDriver::new(&[
            "0",    // task: sequential-update
            "",     // max_chunks: none
            "",     // export_path
            "json", // export_format
            "1",    // feed: gaussian-generator
            "2",    // feature_count
            "5",    // mean
            "1.5",  // mean_step
            "",     // std_dev
            "10",   // chunk_size
            "4",    // max_chunks
            "",     // seed
        ]);

        let TaskChoice::SequentialUpdate(p) = prompt_choice::<TaskChoice, _>(&driver).unwrap();
        assert_eq!(driver.remaining(), 0);
        assert_eq!(p.max_chunks, None);
        assert_eq!(p.export_format, "json");

        let FeedChoice::GaussianGenerator(g) = p.feed else {
            panic!("wrong feed");
        };
        assert_eq!(g.feature_count, 2);
        assert_eq!(g.mean, 5.0);
        assert_eq!(g.mean_step, 1.5);
        assert_eq!(g.std_dev, 1.0);
        assert_eq!(g.chunk_size, 10);
        assert_eq!(g.max_chunks, Some(4));
        assert_eq!(g.seed, 42);
    }

    #[test]
    fn csv_path_is_asked_until_valid() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "a,b\n1,2\n3,4").unwrap();
        let real = file.path().to_string_lossy().into_owned();

        let driver = ScriptedDriver::new(&["0", "/definitely/not/here.csv", &real, "25"]);
        let FeedChoice::CsvFile(p) = prompt_choice::<FeedChoice, _>(&driver).unwrap() else {
            panic!("wrong feed");
        };
        assert_eq!(p.path, PathBuf::from(&real));
        assert_eq!(p.chunk_size, 25);
    }

    #[test]
    fn bad_optional_integer_is_an_error() {
        let driver = ScriptedDriver::new(&["0", "many"]);
        assert!(prompt_choice::<TaskChoice, _>(&driver).is_err());
    }

    #[test]
    fn path_rules_check_extension() {
        let rules = PathRules {
            must_exist: false,
            must_be_file: false,
            extensions: vec!["csv".into()],
        };
        assert!(validate_path_str("data.CSV", &rules).is_ok());
        assert!(validate_path_str("data.txt", &rules).is_err());
        assert!(validate_path_str("   ", &rules).is_err());
    }
}
