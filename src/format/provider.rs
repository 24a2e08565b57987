//! Icons for the banks and payment apps that money is added from.

/// The icon for providers that are not in [PROVIDER_ICONS].
pub const DEFAULT_PROVIDER_ICON: &str = "💳";

/// Provider names and their icons. Names must match exactly.
const PROVIDER_ICONS: &[(&str, &str)] = &[
    ("HDFC Bank", "🏦"),
    ("State Bank", "🏛️"),
    ("ICICI Bank", "🏪"),
    ("Axis Bank", "🏢"),
    ("Kotak Bank", "🏬"),
    ("PayTM", "💳"),
    ("PhonePe", "📱"),
    ("Google Pay", "💰"),
    ("UPI", "💸"),
];

/// Get the icon for `provider`, or [DEFAULT_PROVIDER_ICON] if it is not a known provider.
pub fn provider_icon(provider: &str) -> &'static str {
    PROVIDER_ICONS
        .iter()
        .find(|(name, _)| *name == provider)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_PROVIDER_ICON)
}
