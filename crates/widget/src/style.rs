//! Theme to CSS custom properties

use std::collections::BTreeMap;

use lanegate_core::{ThemeConfig, ThemeKey};

pub const CSS_VAR_PREFIX: &str = "--lanegate-";

/// `--lanegate-*` variable name for a theme key
fn variable_name(key: ThemeKey) -> String {
    let mut name = String::from(CSS_VAR_PREFIX);
    for c in key.as_str().chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

/// All recognized theme keys as CSS variables
pub fn css_variables(theme: &ThemeConfig) -> BTreeMap<String, String> {
    ThemeKey::ALL
        .iter()
        .map(|key| (variable_name(*key), theme.value(*key)))
        .collect()
}

/// A rule block declaring the theme's variables on `selector`
pub fn stylesheet(theme: &ThemeConfig, selector: &str) -> String {
    let mut css = format!("{} {{\n", selector);
    for (name, value) in css_variables(theme) {
        css.push_str(&format!("  {}: {};\n", name, value));
    }
    css.push('}');
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_names() {
        assert_eq!(variable_name(ThemeKey::Primary), "--lanegate-primary");
        assert_eq!(
            variable_name(ThemeKey::BorderRadius),
            "--lanegate-border-radius"
        );
    }

    #[test]
    fn test_every_key_is_emitted() {
        let vars = css_variables(&ThemeConfig::default());
        assert_eq!(vars.len(), ThemeKey::ALL.len());
        assert_eq!(vars["--lanegate-primary"], "#375bd2");
        assert_eq!(vars["--lanegate-border-radius"], "8px");
    }

    #[test]
    fn test_unrecognized_keys_do_not_leak() {
        let json = r##"{"palette": {"accent": "#123456"}}"##;
        let theme: ThemeConfig = serde_json::from_str(json).unwrap();
        let vars = css_variables(&theme);
        assert!(!vars.keys().any(|k| k.contains("accent")));
    }

    #[test]
    fn test_stylesheet() {
        let mut theme = ThemeConfig::default();
        theme.border_radius_px = 0;
        let css = stylesheet(&theme, ".lanegate-widget");
        assert!(css.starts_with(".lanegate-widget {\n"));
        assert!(css.contains("  --lanegate-border-radius: 0px;\n"));
        assert!(css.ends_with('}'));
    }
}
