//! Stable identifiers for checks and violation classes.
//!
//! `check_id` is a dotted namespace naming the rule. A violation class is a short
//! snake_case discriminator naming the contract that was broken.

// Checks
pub const CHECK_TOKENS_MARGIN_SPACING: &str = "tokens.margin_spacing";
pub const CHECK_TOKENS_COLOR: &str = "tokens.color";
pub const CHECK_TOKENS_RHYTHM: &str = "tokens.rhythm";
pub const CHECK_CLOSED_SYSTEM: &str = "closed_system";

// Classes: tokens.margin_spacing
pub const CLASS_MARGIN_SPACING: &str = "margin_spacing";

// Classes: tokens.color
pub const CLASS_FORBIDDEN_COMBINATION: &str = "forbidden_combination";
pub const CLASS_INVERSE_ON_LIGHT_SURFACE: &str = "inverse_on_light_surface";
pub const CLASS_MUTED_ON_READABLE_ROLE: &str = "muted_on_readable_role";
pub const CLASS_INLINE_COLOR: &str = "inline_color";

// Classes: tokens.rhythm
pub const CLASS_RAW_LINE_HEIGHT: &str = "raw_line_height";
pub const CLASS_INLINE_LINE_HEIGHT: &str = "inline_line_height";
pub const CLASS_ROLE_LINE_HEIGHT_MISMATCH: &str = "role_line_height_mismatch";

// Classes: closed_system
pub const CLASS_V1_CLASS_NAME: &str = "v1_class_name";
pub const CLASS_V2_INLINE_STYLE: &str = "v2_inline_style";
pub const CLASS_V3_UTILITY_WRAPPER: &str = "v3_utility_wrapper";
pub const CLASS_V4_RAW_HTML: &str = "v4_raw_html";
pub const CLASS_V5_UNTYPED_SPREAD: &str = "v5_untyped_spread";
