//! CSS custom property rendering

use indexmap::IndexMap;

use crate::tokens::{ColorToken, Theme};

/// Custom properties the UI checks expect on the document root.
pub const REQUIRED_VARIABLES: [&str; 3] = ["--color-primary", "--spacing-md", "--radius-md"];

impl Theme {
    /// Flattens every token into `--name: value` pairs.
    ///
    /// Group prefixes: `--color-`, `--spacing-`, `--radius-`, `--shadow-`,
    /// `--font-`, `--text-`, `--blur-`, `--ease-`, `--duration-`. Dots in
    /// token keys become underscores (`spacing.0.5` → `--spacing-0_5`).
    /// Aliases come last, resolved to the value they point at, and replace
    /// any generated property of the same name.
    #[must_use]
    pub fn css_variables(&self) -> IndexMap<String, String> {
        let mut vars = IndexMap::new();

        for (name, token) in &self.colors {
            match token {
                ColorToken::Single(value) => {
                    vars.insert(var("color", name), value.clone());
                }
                ColorToken::Palette(shades) => {
                    for (shade, value) in shades {
                        vars.insert(var("color", &format!("{name}-{shade}")), value.clone());
                    }
                }
            }
        }

        extend(&mut vars, "spacing", &self.spacing);
        extend(&mut vars, "radius", &self.radius);
        extend(&mut vars, "shadow", &self.shadow);

        for (name, fonts) in &self.font_family {
            vars.insert(var("font", name), font_stack(fonts));
        }

        for (name, step) in &self.font_size {
            vars.insert(var("text", name), step.size.clone());
            vars.insert(
                var("text", &format!("{name}-line-height")),
                step.line_height.clone(),
            );
            vars.insert(
                var("text", &format!("{name}-font-weight")),
                step.font_weight.clone(),
            );
        }

        extend(&mut vars, "blur", &self.blur);
        extend(&mut vars, "ease", &self.easing);
        extend(&mut vars, "duration", &self.duration);

        for (alias, path) in &self.aliases {
            if let Some(value) = self.resolve(path) {
                vars.insert(format!("--{alias}"), value.to_owned());
            }
        }

        vars
    }

    /// Renders the custom properties as a `:root` rule.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in self.css_variables() {
            css.push_str(&format!("  {name}: {value};\n"));
        }
        css.push_str("}\n");
        css
    }

    /// Names of the custom properties the UI checks read from `:root`.
    #[must_use]
    pub const fn required_variables() -> &'static [&'static str] {
        &REQUIRED_VARIABLES
    }

    /// Required properties this theme does not define.
    #[must_use]
    pub fn missing_required_variables(&self) -> Vec<&'static str> {
        let vars = self.css_variables();
        REQUIRED_VARIABLES
            .iter()
            .copied()
            .filter(|name| vars.get(*name).is_none_or(String::is_empty))
            .collect()
    }
}

fn var(prefix: &str, key: &str) -> String {
    format!("--{prefix}-{}", key.replace('.', "_"))
}

fn extend(vars: &mut IndexMap<String, String>, prefix: &str, group: &IndexMap<String, String>) {
    for (key, value) in group {
        vars.insert(var(prefix, key), value.clone());
    }
}

fn font_stack(fonts: &[String]) -> String {
    fonts
        .iter()
        .map(|font| {
            if font.contains(' ') {
                format!("\"{font}\"")
            } else {
                font.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
