// ==========================================
// Rework Tracker - Internationalization (i18n)
// ==========================================
// Insight templates via rust-i18n (locales/en.yml, locales/zh-CN.yml)
// The locale is always passed per call; the process-wide locale
// is never read, so reports do not depend on global state.
// ==========================================
// Note: rust_i18n::i18n! is initialized in lib.rs
// ==========================================

/// Translate a key in the given locale and fill `%{name}` placeholders
///
/// # Example
/// ```no_run
/// use rework_tracker::i18n::t_in;
/// let msg = t_in("en", "insight.production.fails", &[("fails", "3".to_string())]);
/// ```
pub fn t_in(locale: &str, key: &str, args: &[(&str, String)]) -> String {
    let mut result = rust_i18n::t!(key, locale = locale).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
