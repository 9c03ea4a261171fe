use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use spdx_checkr::{Expr, Strictness};

use crate::models::Verdict;

/// Root configuration structure, deserialized from `.spdx-checkr/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Expression policy.
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Defines how expressions are evaluated.
#[derive(Debug, Default, Deserialize)]
pub struct PolicyConfig {
    /// Default strictness when `--strictness` is not given.
    #[serde(default)]
    pub strictness: StrictnessPolicy,
    /// Per-license overrides keyed by SPDX identifier or rendered `WITH`
    /// group (e.g. `"GPL-3.0-only"`, `"GPL-2.0-only WITH Classpath-exception-2.0"`),
    /// matched against the normalized atomic licenses of each expression.
    #[serde(default)]
    pub licenses: HashMap<String, PolicyAction>,
}

/// Strictness level as spelled in the config file.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrictnessPolicy {
    Any,
    Deprecated,
    #[default]
    Current,
}

impl From<StrictnessPolicy> for Strictness {
    fn from(policy: StrictnessPolicy) -> Self {
        match policy {
            StrictnessPolicy::Any => Strictness::AllowAny,
            StrictnessPolicy::Deprecated => Strictness::AllowDeprecated,
            StrictnessPolicy::Current => Strictness::AllowCurrent,
        }
    }
}

/// The action to take when an atomic license matches a policy rule.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PolicyAction {
    /// License is acceptable even when unknown to the catalog.
    Allow,
    /// License fails the check; the CLI exits with code 1.
    Deny,
}

/// Load the policy configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.spdx-checkr/config.toml`
/// 3. `~/.config/spdx-checkr/config.toml`
/// 4. Built-in [`Config::default`] (current strictness, no overrides)
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let project_config = Path::new(".spdx-checkr").join("config.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("spdx-checkr").join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}

/// Apply the per-license policy to a parsed (and normalized) expression.
///
/// Every atomic license of the expression is matched against the overrides;
/// a `WITH` group is matched both as a whole and by its base license. Denied
/// licenses produce [`Verdict::Error`]; licenses the catalog does not know
/// produce [`Verdict::Warn`] unless allow-listed.
pub fn apply_policy(config: &Config, expr: &Expr) -> (Verdict, Option<String>) {
    let mut verdict = Verdict::Pass;
    let mut detail = None;

    for atom in expr.decompose() {
        let rendered = atom.to_string();
        let action = policy_action(config, &atom, &rendered);

        if action == Some(PolicyAction::Deny) {
            return (Verdict::Error, Some(format!("`{rendered}` denied by policy")));
        }

        // Unknown identifiers only survive parsing under lenient strictness;
        // flag them unless the policy explicitly allows them.
        if verdict == Verdict::Pass
            && action.is_none()
            && !atom.is_valid(Strictness::AllowDeprecated)
        {
            verdict = Verdict::Warn;
            detail = Some(format!("`{rendered}` is unknown to the SPDX catalog"));
        }
    }

    (verdict, detail)
}

fn policy_action(config: &Config, atom: &Expr, rendered: &str) -> Option<PolicyAction> {
    if let Some(action) = config.policy.licenses.get(rendered) {
        return Some(action.clone());
    }
    // Fall back to the base license of a WITH group.
    if let Expr::With { license, .. } = atom {
        return config.policy.licenses.get(&license.to_string()).cloned();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Expr {
        Expr::parse(text, Strictness::AllowAny).unwrap()
    }

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str(
            r#"
[policy]
strictness = "deprecated"

[policy.licenses]
"GPL-3.0-only" = "deny"
"LicenseRef-internal" = "allow"
"#,
        )
        .unwrap();

        assert!(matches!(config.policy.strictness, StrictnessPolicy::Deprecated));
        assert_eq!(
            config.policy.licenses.get("GPL-3.0-only"),
            Some(&PolicyAction::Deny)
        );
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(matches!(config.policy.strictness, StrictnessPolicy::Current));
        assert!(config.policy.licenses.is_empty());

        let (verdict, detail) = apply_policy(&config, &parse("MIT AND ISC"));
        assert_eq!(verdict, Verdict::Pass);
        assert_eq!(detail, None);
    }

    #[test]
    fn test_denied_license() {
        let mut config = Config::default();
        config
            .policy
            .licenses
            .insert("GPL-3.0-only".to_string(), PolicyAction::Deny);

        let (verdict, detail) = apply_policy(&config, &parse("MIT OR GPL-3.0-only"));
        assert_eq!(verdict, Verdict::Error);
        assert!(detail.unwrap().contains("GPL-3.0-only"));
    }

    #[test]
    fn test_deny_matches_base_license_of_with_group() {
        let mut config = Config::default();
        config
            .policy
            .licenses
            .insert("GPL-2.0-only".to_string(), PolicyAction::Deny);

        let expr = parse("GPL-2.0-only WITH Classpath-exception-2.0");
        let (verdict, _) = apply_policy(&config, &expr);
        assert_eq!(verdict, Verdict::Error);
    }

    #[test]
    fn test_unknown_license_warns() {
        let config = Config::default();
        let (verdict, detail) = apply_policy(&config, &parse("MIT AND Homegrown-1.0"));
        assert_eq!(verdict, Verdict::Warn);
        assert!(detail.unwrap().contains("Homegrown-1.0"));
    }

    #[test]
    fn test_allow_silences_unknown_warning() {
        let mut config = Config::default();
        config
            .policy
            .licenses
            .insert("Homegrown-1.0".to_string(), PolicyAction::Allow);

        let (verdict, detail) = apply_policy(&config, &parse("MIT AND Homegrown-1.0"));
        assert_eq!(verdict, Verdict::Pass);
        assert_eq!(detail, None);
    }

    #[test]
    fn test_license_refs_do_not_warn() {
        let config = Config::default();
        let (verdict, _) = apply_policy(&config, &parse("MIT AND LicenseRef-internal"));
        assert_eq!(verdict, Verdict::Pass);
    }
}
