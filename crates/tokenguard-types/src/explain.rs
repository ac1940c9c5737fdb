//! Explain registry for checks and violation classes.
//!
//! Maps check IDs and classes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or violation class.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/class.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after code examples.
    pub examples: ExamplePair,
}

/// Before and after code examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Code that would trigger a finding.
    pub before: &'static str,
    /// Code that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or violation class.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_TOKENS_MARGIN_SPACING => Some(explain_margin_spacing()),
        ids::CHECK_TOKENS_COLOR => Some(explain_color()),
        ids::CHECK_TOKENS_RHYTHM => Some(explain_rhythm()),
        ids::CHECK_CLOSED_SYSTEM => Some(explain_closed_system()),

        // Classes
        ids::CLASS_MARGIN_SPACING => Some(explain_margin_spacing()),
        ids::CLASS_FORBIDDEN_COMBINATION => Some(titled(explain_color(), "Forbidden Role/Color Combination")),
        ids::CLASS_INVERSE_ON_LIGHT_SURFACE => Some(explain_inverse_on_light()),
        ids::CLASS_MUTED_ON_READABLE_ROLE => Some(titled(explain_color(), "Muted Color on Readable Role")),
        ids::CLASS_INLINE_COLOR => Some(explain_inline_color()),
        ids::CLASS_RAW_LINE_HEIGHT => Some(titled(explain_rhythm(), "Raw Line-Height Value")),
        ids::CLASS_INLINE_LINE_HEIGHT => Some(titled(explain_rhythm(), "Inline Line-Height")),
        ids::CLASS_ROLE_LINE_HEIGHT_MISMATCH => Some(explain_role_mismatch()),
        ids::CLASS_V1_CLASS_NAME => Some(titled(explain_closed_system(), "V1: className on Regulated Component")),
        ids::CLASS_V2_INLINE_STYLE => Some(titled(explain_closed_system(), "V2: style on Regulated Component")),
        ids::CLASS_V3_UTILITY_WRAPPER => Some(explain_utility_wrapper()),
        ids::CLASS_V4_RAW_HTML => Some(explain_raw_html()),
        ids::CLASS_V5_UNTYPED_SPREAD => Some(explain_untyped_spread()),

        _ => None,
    }
}

fn titled(mut exp: Explanation, title: &'static str) -> Explanation {
    exp.title = title;
    exp
}

// --- Check-level explanations ---

fn explain_margin_spacing() -> Explanation {
    Explanation {
        title: "No Vertical Margin on Typography",
        description: "\
Detects `Text` and `Heading` elements that carry vertical margin, either through
utility classes (`mt-*`, `mb-*`, `my-*`, `m-*`) or through an inline style setting
`marginTop`, `marginBottom` or the `marginBlock*` properties.

Typography components own their line box, not the space around it. Vertical
rhythm between blocks belongs to the layout container, so margins on text:
- collapse unpredictably with neighbouring blocks
- drift out of the spacing scale over time
- make the same component render differently in every screen

Story and test files are not checked.",
        remediation: "\
Move the spacing to the parent layout primitive:

    <Stack gap=\"md\">
      <Heading typographyRole=\"title\">Orders</Heading>
      <Text typographyRole=\"body\">…</Text>
    </Stack>

Horizontal margins (`mx-*`, `ml-*`, `mr-*`) are not affected.",
        examples: ExamplePair {
            before: r#"<Heading className="mt-lg mb-sm">Orders</Heading>
<Text style={{ marginBottom: 12 }}>Pending</Text>"#,
            after: r#"<Stack gap="sm">
  <Heading>Orders</Heading>
  <Text>Pending</Text>
</Stack>"#,
        },
    }
}

fn explain_color() -> Explanation {
    Explanation {
        title: "Typography Color Policy",
        description: "\
Detects text color tokens applied to typography roles that do not allow them.

Every typography role has a fixed allow-list of text colors. Pairs are
recognized from `typographyRole`/`color` props, from `typography.<role>` and
`colors.text.<color>` accessor paths, from `typography-<role>` / `text-<color>`
utility classes and from `--typography-<role>` / `--color-text-<color>` CSS
variables appearing in the same string or element.

Two combinations are always rejected:
- `muted` or `tertiary` on a readable role (`body`, `body-small`, `title`, `subtitle`)
- `inverse` text together with a light surface token

Inline `style.color` on `Text`/`Heading` is rejected regardless of value.",
        remediation: "\
Pick a color from the role's allow-list, or change the role:

    <Text typographyRole=\"caption\" color=\"muted\">Last synced 2m ago</Text>

Run `tokenguard explain forbidden_combination` to see this again.",
        examples: ExamplePair {
            before: r#"<Text typographyRole="body" color="muted">Terms apply</Text>"#,
            after: r#"<Text typographyRole="caption" color="muted">Terms apply</Text>"#,
        },
    }
}

fn explain_rhythm() -> Explanation {
    Explanation {
        title: "Line-Height Rhythm Policy",
        description: "\
Detects raw line-height values and role/line-height combinations that break the
vertical rhythm.

Raw values are numbers or unit-suffixed lengths (`1.25`, `24px`, `1.5rem`,
`150%`) found in an inline style, in a CSS-in-JS block (`line-height: 20px;`) or
in a plain object property (`lineHeight: 1.4`). Values already expressed as a
token (`var(--line-height-*)`, `leading-*`, `lineHeights.*`) are exempt.

When a typography role is given explicitly, the line-height must be the role's
canonical token (body -> relaxed, title -> snug, display -> tight, ...).",
        remediation: "\
Drop the explicit line-height and let the role supply it, or use the role's
canonical token:

    <Text typographyRole=\"body\" lineHeight=\"relaxed\">…</Text>",
        examples: ExamplePair {
            before: r#"const card = css`
  line-height: 22px;
`;
<Text typographyRole="body" lineHeight="tight">…</Text>"#,
            after: r#"const card = css`
  line-height: var(--line-height-relaxed);
`;
<Text typographyRole="body">…</Text>"#,
        },
    }
}

fn explain_closed_system() -> Explanation {
    Explanation {
        title: "Closed-System Consumer Contract",
        description: "\
Detects consumer code that bypasses the component library's styling contract.
Only components imported from the published package (`@northstar/ui`, its
sub-paths, or the legacy `@northstar/design-system` alias) or from the
internal layers (`@/ui/primitives`, `@/ui/typography`, `@/ui/layout`,
`@/ui/forms`) are regulated.

- V1: `className` passed to a regulated component
- V2: `style` passed to a regulated component
- V3: a plain element with utility classes wrapping a regulated component
- V4: a raw HTML tag used while its regulated replacement is imported
- V5: an untyped object spread passed to a regulated component",
        remediation: "\
Express the intent through the component's typed props (`variant`, `tone`,
`gap`, `padding`, ...). If a prop is missing, request it from the design
system instead of styling around the component.",
        examples: ExamplePair {
            before: r#"import { Button } from '@northstar/ui';

<Button className="mt-4 bg-red-500" {...props}>Delete</Button>"#,
            after: r#"import { Button, type ButtonProps } from '@northstar/ui';

<Button tone="danger" {...buttonProps}>Delete</Button>"#,
        },
    }
}

// --- Class-level explanations ---

fn explain_inverse_on_light() -> Explanation {
    Explanation {
        title: "Inverse Text on Light Surface",
        description: "\
Detects `inverse` text color used in the same element or style block as a light
surface token (`surface-light`, `surface-base`, `surface-raised`, `bg-white`,
`bg-surface`). Inverse text is designed for dark surfaces; on light surfaces it
fails contrast requirements.",
        remediation: "\
Use `primary` or `secondary` text on light surfaces, or switch the container to
a dark surface token.",
        examples: ExamplePair {
            before: r#"<Text color="inverse" className="bg-surface-light">Saved</Text>"#,
            after: r#"<Text color="primary">Saved</Text>"#,
        },
    }
}

fn explain_inline_color() -> Explanation {
    Explanation {
        title: "Inline Color on Typography",
        description: "\
Detects `style={{ color: ... }}` on `Text` or `Heading`. Inline color bypasses
the role allow-lists entirely, so it is rejected whatever the value is.",
        remediation: "\
Use the `color` prop with a text color token allowed for the role.",
        examples: ExamplePair {
            before: r##"<Text style={{ color: "#666" }}>Draft</Text>"##,
            after: r#"<Text color="secondary">Draft</Text>"#,
        },
    }
}

fn explain_role_mismatch() -> Explanation {
    Explanation {
        title: "Role/Line-Height Mismatch",
        description: "\
Detects an explicit typography role combined with a line-height that is not
the role's canonical token. Only resolvable roles are checked; a role that
cannot be reduced to a literal produces no finding.",
        remediation: "\
Remove the explicit line-height, or use the canonical token for the role.",
        examples: ExamplePair {
            before: r#"<Heading typographyRole="display" lineHeight="relaxed">Hi</Heading>"#,
            after: r#"<Heading typographyRole="display">Hi</Heading>"#,
        },
    }
}

fn explain_utility_wrapper() -> Explanation {
    Explanation {
        title: "V3: Utility-Class Wrapper",
        description: "\
Detects a plain HTML element carrying styling utility classes (`p-*`, `bg-*`,
`flex`, `rounded`, ...) with a regulated component anywhere in its subtree.
The wrapper re-styles the component from the outside, which the closed
system is meant to prevent.",
        remediation: "\
Replace the wrapper with a layout primitive (`Box`, `Stack`, `Inline`,
`Surface`) and its typed spacing props.",
        examples: ExamplePair {
            before: r#"<div className="p-md bg-surface">
  <Text>Total</Text>
</div>"#,
            after: r#"<Surface padding="md">
  <Text>Total</Text>
</Surface>"#,
        },
    }
}

fn explain_raw_html() -> Explanation {
    Explanation {
        title: "V4: Raw HTML With Available Substitute",
        description: "\
Detects a raw HTML tag (`button`, `a`, `h1`-`h6`, `p`, `input`, ...) in a file
that already imports the regulated component meant to replace it. Files that
import no alternative are not flagged.",
        remediation: "\
Use the imported regulated component instead of the raw tag.",
        examples: ExamplePair {
            before: r#"import { Button } from '@northstar/ui';

<button onClick={save}>Save</button>"#,
            after: r#"import { Button } from '@northstar/ui';

<Button onClick={save}>Save</Button>"#,
        },
    }
}

fn explain_untyped_spread() -> Explanation {
    Explanation {
        title: "V5: Untyped Prop Spread",
        description: "\
Detects object spreads passed into a regulated component. A spread of an
identifier named after the component (`buttonProps`, `TextProps`) is allowed.
Generic catch-all names (`props`, `rest`, `others`, ...) are reported with HIGH
confidence; any other spread expression is reported with LOW confidence as
possible smuggling of `className`/`style`.",
        remediation: "\
Destructure the props you forward and type the remainder with the component's
props type.",
        examples: ExamplePair {
            before: r#"<Text {...rest}>Hi</Text>"#,
            after: r#"const textProps: TextProps = { typographyRole: "body" };
<Text {...textProps}>Hi</Text>"#,
        },
    }
}
