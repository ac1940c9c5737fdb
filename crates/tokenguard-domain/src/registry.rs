//! Fixed registries: regulated components, typography roles, text colors,
//! line-height tokens, and the patterns used to recognise them in text.
//!
//! Registries are immutable and injected into every rule call.

use regex::Regex;
use std::sync::LazyLock;

// A pattern that fails to compile yields no matches instead of panicking.
static ROLE_ACCESSOR: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\btypography\.(?:roles\.)?([A-Za-z][A-Za-z0-9]*)").ok()
});
static ROLE_CLASS: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|[^A-Za-z0-9_-])(?:--)?typography-(display|headline|title|subtitle|body-small|body|label|caption|overline|code)\b",
    )
    .ok()
});
static COLOR_ACCESSOR: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\b(?:colors\.text|textColor)\.([A-Za-z][A-Za-z0-9]*)").ok()
});
static COLOR_CLASS: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|[^A-Za-z0-9_-])(?:text|--color-text)-(primary|secondary|tertiary|muted|inverse|accent|link|disabled|success|warning|danger)\b",
    )
    .ok()
});
static RAW_LINE_HEIGHT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^-?(\d+\.?\d*|\.\d+)(px|rem|em|%|pt)?$").ok());
static CSS_LINE_HEIGHT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|[^A-Za-z0-9_-])line-height\s*:\s*([^;}\n]+)").ok());

/// Where a regulated import came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImportOrigin {
    PublicSurface,
    InternalPrivileged,
}

impl ImportOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            ImportOrigin::PublicSurface => "public_surface",
            ImportOrigin::InternalPrivileged => "internal_privileged",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Registries {
    pub public_packages: &'static [&'static str],
    pub internal_prefixes: &'static [&'static str],
    pub regulated: &'static [&'static str],
    pub typography_components: &'static [&'static str],
    pub roles: &'static [&'static str],
    pub colors: &'static [&'static str],
    pub readable_roles: &'static [&'static str],
    pub quiet_colors: &'static [&'static str],
    pub light_surfaces: &'static [&'static str],
    pub line_height_tokens: &'static [&'static str],
    pub margin_prefixes: &'static [&'static str],
    pub margin_style_keys: &'static [&'static str],
    pub utility_prefixes: &'static [&'static str],
    pub utility_exact: &'static [&'static str],
    pub generic_spread_names: &'static [&'static str],
}

impl Default for Registries {
    fn default() -> Self {
        Self::standard()
    }
}

impl Registries {
    pub fn standard() -> Self {
        Self {
            public_packages: &["@northstar/ui", "@northstar/design-system"],
            internal_prefixes: &[
                "@/ui/primitives",
                "@/ui/typography",
                "@/ui/layout",
                "@/ui/forms",
            ],
            regulated: &[
                "Text",
                "Heading",
                "Box",
                "Stack",
                "Inline",
                "Grid",
                "Surface",
                "Card",
                "Button",
                "IconButton",
                "Link",
                "Input",
                "TextArea",
                "Select",
                "Checkbox",
                "Icon",
                "Image",
                "Divider",
                "Badge",
                "List",
                "ListItem",
            ],
            typography_components: &["Text", "Heading"],
            roles: &[
                "display",
                "headline",
                "title",
                "subtitle",
                "body",
                "body-small",
                "label",
                "caption",
                "overline",
                "code",
            ],
            colors: &[
                "primary",
                "secondary",
                "tertiary",
                "muted",
                "inverse",
                "accent",
                "link",
                "disabled",
                "success",
                "warning",
                "danger",
            ],
            readable_roles: &["body", "body-small", "title", "subtitle"],
            quiet_colors: &["muted", "tertiary"],
            light_surfaces: &[
                "surface-light",
                "surface-base",
                "surface-raised",
                "bg-white",
                "bg-surface",
            ],
            line_height_tokens: &["none", "tight", "snug", "normal", "relaxed", "loose"],
            margin_prefixes: &["mt-", "mb-", "my-", "m-"],
            margin_style_keys: &[
                "marginTop",
                "marginBottom",
                "marginBlock",
                "marginBlockStart",
                "marginBlockEnd",
                "margin-top",
                "margin-bottom",
                "margin-block",
                "margin-block-start",
                "margin-block-end",
            ],
            utility_prefixes: &[
                "p-", "px-", "py-", "pt-", "pb-", "pl-", "pr-", "m-", "mx-", "my-", "mt-", "mb-",
                "ml-", "mr-", "gap-", "space-x-", "space-y-", "bg-", "text-", "font-", "leading-",
                "tracking-", "rounded", "border", "shadow", "w-", "h-", "min-w-", "max-w-",
                "min-h-", "max-h-", "items-", "justify-",
            ],
            utility_exact: &["flex", "grid", "block", "inline-flex", "hidden"],
            generic_spread_names: &[
                "props",
                "rest",
                "restProps",
                "otherProps",
                "others",
                "attrs",
                "attributes",
                "passthrough",
            ],
        }
    }

    pub fn is_regulated(&self, name: &str) -> bool {
        self.regulated.contains(&name)
    }

    /// Registry spelling of a component name, if regulated.
    pub fn canonical_component(&self, name: &str) -> Option<&'static str> {
        self.regulated.iter().copied().find(|c| *c == name)
    }

    pub fn is_typography(&self, name: &str) -> bool {
        self.typography_components.contains(&name)
    }

    pub fn role(&self, value: &str) -> Option<&'static str> {
        let value = value.trim();
        self.roles.iter().copied().find(|r| *r == value)
    }

    pub fn color(&self, value: &str) -> Option<&'static str> {
        let value = value.trim();
        self.colors.iter().copied().find(|c| *c == value)
    }

    pub fn allowed_colors(&self, role: &str) -> &'static [&'static str] {
        match role {
            "display" | "headline" => &["primary", "inverse", "accent"],
            "title" | "subtitle" => &["primary", "secondary", "inverse"],
            "body" | "body-small" => &["primary", "secondary", "inverse", "link"],
            "label" => &[
                "primary",
                "secondary",
                "tertiary",
                "muted",
                "inverse",
                "disabled",
            ],
            "caption" => &["secondary", "tertiary", "muted", "inverse"],
            "overline" => &["secondary", "tertiary", "muted"],
            "code" => &["primary", "secondary"],
            _ => &[],
        }
    }

    pub fn is_readable_role(&self, role: &str) -> bool {
        self.readable_roles.contains(&role)
    }

    pub fn is_quiet_color(&self, color: &str) -> bool {
        self.quiet_colors.contains(&color)
    }

    pub fn canonical_line_height(&self, role: &str) -> Option<&'static str> {
        match role {
            "display" | "headline" => Some("tight"),
            "title" | "subtitle" => Some("snug"),
            "body" => Some("relaxed"),
            "body-small" | "label" | "caption" | "overline" | "code" => Some("normal"),
            _ => None,
        }
    }

    pub fn is_line_height_token(&self, value: &str) -> bool {
        self.line_height_tokens.contains(&value)
    }

    /// Regulated components that replace a raw HTML tag.
    pub fn substitutes(&self, tag: &str) -> &'static [&'static str] {
        match tag {
            "button" => &["Button", "IconButton"],
            "a" => &["Link"],
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => &["Heading"],
            "p" | "span" | "label" => &["Text"],
            "input" => &["Input"],
            "textarea" => &["TextArea"],
            "select" => &["Select"],
            "img" => &["Image"],
            "hr" => &["Divider"],
            "ul" | "ol" => &["List"],
            "li" => &["ListItem"],
            _ => &[],
        }
    }

    pub fn is_generic_spread_name(&self, name: &str) -> bool {
        self.generic_spread_names.contains(&name)
    }

    // --- text recognition ---

    /// Typography roles referenced in free text, in order of first appearance.
    pub fn roles_in(&self, text: &str) -> Vec<&'static str> {
        let mut out = Vec::new();
        if let Some(re) = ROLE_ACCESSOR.as_ref() {
            for caps in re.captures_iter(text) {
                if let Some(role) = caps.get(1).and_then(|m| self.role(&camel_to_kebab(m.as_str())))
                {
                    push_unique(&mut out, role);
                }
            }
        }
        if let Some(re) = ROLE_CLASS.as_ref() {
            for caps in re.captures_iter(text) {
                if let Some(role) = caps.get(1).and_then(|m| self.role(m.as_str())) {
                    push_unique(&mut out, role);
                }
            }
        }
        out
    }

    /// Text colors referenced in free text, in order of first appearance.
    pub fn colors_in(&self, text: &str) -> Vec<&'static str> {
        let mut out = Vec::new();
        if let Some(re) = COLOR_ACCESSOR.as_ref() {
            for caps in re.captures_iter(text) {
                if let Some(color) = caps.get(1).and_then(|m| self.color(m.as_str())) {
                    push_unique(&mut out, color);
                }
            }
        }
        if let Some(re) = COLOR_CLASS.as_ref() {
            for caps in re.captures_iter(text) {
                if let Some(color) = caps.get(1).and_then(|m| self.color(m.as_str())) {
                    push_unique(&mut out, color);
                }
            }
        }
        out
    }

    /// Light surface tokens in free text. A word matches when it equals the
    /// token or ends with `-<token>` (`bg-surface-light`, `--color-surface-base`).
    pub fn light_surfaces_in(&self, text: &str) -> Vec<&'static str> {
        let mut out = Vec::new();
        for word in text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_')) {
            if word.is_empty() {
                continue;
            }
            for token in self.light_surfaces {
                let suffixed = word
                    .strip_suffix(token)
                    .is_some_and(|head| head.ends_with('-'));
                if word == *token || suffixed {
                    push_unique(&mut out, token);
                }
            }
        }
        out
    }

    /// True for bare numbers and unit-suffixed lengths (`1.5`, `24px`, `150%`).
    pub fn is_raw_line_height(&self, value: &str) -> bool {
        RAW_LINE_HEIGHT
            .as_ref()
            .is_some_and(|re| re.is_match(value.trim()))
    }

    /// Values of `line-height: <value>` declarations in CSS text.
    pub fn css_line_heights(&self, text: &str) -> Vec<String> {
        let Some(re) = CSS_LINE_HEIGHT.as_ref() else {
            return Vec::new();
        };
        re.captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| {
                let value = m.as_str().trim();
                value
                    .strip_suffix("!important")
                    .unwrap_or(value)
                    .trim()
                    .to_string()
            })
            .collect()
    }
}

fn push_unique(out: &mut Vec<&'static str>, value: &'static str) {
    if !out.contains(&value) {
        out.push(value);
    }
}

/// `bodySmall` -> `body-small`.
pub fn camel_to_kebab(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    for (i, c) in value.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_allow_list_and_line_height() {
        let reg = Registries::standard();
        for role in reg.roles {
            assert!(!reg.allowed_colors(role).is_empty(), "{role}");
            assert!(reg.canonical_line_height(role).is_some(), "{role}");
        }
    }

    #[test]
    fn allow_lists_only_name_known_colors() {
        let reg = Registries::standard();
        for role in reg.roles {
            for color in reg.allowed_colors(role) {
                assert!(reg.color(color).is_some(), "{role}: {color}");
            }
        }
    }

    #[test]
    fn substitutes_are_regulated() {
        let reg = Registries::standard();
        for tag in [
            "button", "a", "h1", "h6", "p", "span", "label", "input", "textarea", "select", "img",
            "hr", "ul", "ol", "li",
        ] {
            let subs = reg.substitutes(tag);
            assert!(!subs.is_empty(), "{tag}");
            assert!(subs.iter().all(|s| reg.is_regulated(s)), "{tag}");
        }
        assert!(reg.substitutes("div").is_empty());
    }

    #[test]
    fn recognises_roles_in_text() {
        let reg = Registries::standard();
        assert_eq!(reg.roles_in("theme.typography.bodySmall"), vec!["body-small"]);
        assert_eq!(reg.roles_in("typography.roles.caption"), vec!["caption"]);
        assert_eq!(reg.roles_in("typography-title text-muted"), vec!["title"]);
        assert_eq!(
            reg.roles_in("font: var(--typography-body-small)"),
            vec!["body-small"]
        );
        assert!(reg.roles_in("typography.fontFamily").is_empty());
        assert!(reg.roles_in("mytypography-body").is_empty());
    }

    #[test]
    fn recognises_colors_in_text() {
        let reg = Registries::standard();
        assert_eq!(reg.colors_in("colors.text.muted"), vec!["muted"]);
        assert_eq!(reg.colors_in("tokens.textColor.inverse"), vec!["inverse"]);
        assert_eq!(reg.colors_in("md:text-secondary"), vec!["secondary"]);
        assert_eq!(reg.colors_in("color: var(--color-text-link)"), vec!["link"]);
        assert!(reg.colors_in("context-muted").is_empty());
        assert!(reg.colors_in("text-lg").is_empty());
    }

    #[test]
    fn recognises_light_surfaces() {
        let reg = Registries::standard();
        assert_eq!(reg.light_surfaces_in("bg-surface-light p-4"), vec!["surface-light"]);
        assert_eq!(reg.light_surfaces_in("bg-white"), vec!["bg-white"]);
        assert!(reg.light_surfaces_in("bg-surface-dark").is_empty());
    }

    #[test]
    fn raw_line_height_values() {
        let reg = Registries::standard();
        for raw in ["1", "1.5", ".9", "-1", "24px", "1.25rem", "2em", "150%", "12pt", " 20px "] {
            assert!(reg.is_raw_line_height(raw), "{raw}");
        }
        for token in ["relaxed", "var(--line-height-body)", "leading-6", "1.5vh", "calc(1px)"] {
            assert!(!reg.is_raw_line_height(token), "{token}");
        }
    }

    #[test]
    fn css_declarations_are_extracted() {
        let reg = Registries::standard();
        assert_eq!(
            reg.css_line_heights("font-size: 14px; line-height: 20px !important;\n line-height:var(--leading-tight)"),
            vec!["20px".to_string(), "var(--leading-tight)".to_string()]
        );
        assert!(reg.css_line_heights("min-line-height: 2").is_empty());
    }

    #[test]
    fn camel_case_becomes_kebab() {
        assert_eq!(camel_to_kebab("bodySmall"), "body-small");
        assert_eq!(camel_to_kebab("body"), "body");
    }
}
