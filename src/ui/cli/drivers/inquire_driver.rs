use crate::ui::cli::drivers::PromptDriver;
use anyhow::Result;
use inquire::validator::Validation;
use inquire::{Confirm, CustomType, Select, Text};
use std::fmt::Display;

pub struct InquireDriver;

fn range_message<T: Display>(min: Option<T>, max: Option<T>) -> Option<String> {
    match (min, max) {
        (Some(lo), Some(hi)) => Some(format!("Must be between {lo} and {hi}")),
        (Some(lo), None) => Some(format!("Must be ≥ {lo}")),
        (None, Some(hi)) => Some(format!("Must be ≤ {hi}")),
        (None, None) => None,
    }
}

fn ask_in_range<T>(title: &str, help: &str, default: T, min: Option<T>, max: Option<T>) -> Result<T>
where
    T: Copy + Display + PartialOrd + std::str::FromStr + Send + Sync + 'static,
{
    let mut q = CustomType::<T>::new(title)
        .with_default(default)
        .with_help_message(help);

    if let Some(msg) = range_message(min, max) {
        q = q.with_validator(move |x: &T| {
            let low_ok = min.is_none_or(|lo| *x >= lo);
            let high_ok = max.is_none_or(|hi| *x <= hi);
            if low_ok && high_ok {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid(msg.clone().into()))
            }
        });
    }

    Ok(q.prompt()?)
}

impl PromptDriver for InquireDriver {
    fn ask_select(&self, title: &str, help: Option<&str>, options: &[String]) -> Result<usize> {
        let mut select = Select::new(title, options.to_vec());
        if let Some(help) = help {
            select = select.with_help_message(help);
        }
        Ok(select.raw_prompt()?.index)
    }

    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String> {
        Ok(Text::new(title)
            .with_initial_value(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        ask_in_range(title, help, default, min, max)
    }

    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        ask_in_range(title, help, default, min, max)
    }
}
