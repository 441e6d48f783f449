use anyhow::Result;

/// Source of answers for the configuration wizard.
///
/// The terminal implementation is [`InquireDriver`](super::InquireDriver);
/// tests script answers instead.
pub trait PromptDriver {
    /// Index into `options` of the selected entry.
    fn ask_select(&self, title: &str, help: Option<&str>, options: &[String]) -> Result<usize>;
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool>;
    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String>;
    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64>;
    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64>;

    /// Free-text answer where blank means "none".
    fn ask_optional(&self, title: &str, help: &str, default: &str) -> Result<Option<String>> {
        let answer = self.ask_string(title, &format!("{help}\n(leave blank for none)"), default)?;
        let answer = answer.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }
}
