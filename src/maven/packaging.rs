use std::collections::HashMap;

use lazy_static::lazy_static;

pub const DEFAULT_EXTENSION: &str = "jar";

lazy_static! {
    /// packaging (as declared in a POM) -> file extension of the artifact's main bundle
    static ref EXTENSIONS: HashMap<&'static str, &'static str> = HashMap::from([
        ("jar", "jar"),
        ("ejb", "jar"),
        ("ejb-client", "jar"),
        ("war", "war"),
        ("ear", "ear"),
        ("pom", "pom"),
    ]);
}

/// Unknown or missing packaging falls back to [`DEFAULT_EXTENSION`].
pub fn extension_for_packaging(packaging: Option<&str>) -> &'static str {
    packaging
        .and_then(|p| EXTENSIONS.get(p))
        .copied()
        .unwrap_or(DEFAULT_EXTENSION)
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::jar(Some("jar"), "jar")]
    #[case::ejb(Some("ejb"), "jar")]
    #[case::ejb_client(Some("ejb-client"), "jar")]
    #[case::war(Some("war"), "war")]
    #[case::ear(Some("ear"), "ear")]
    #[case::pom(Some("pom"), "pom")]
    #[case::absent(None, "jar")]
    #[case::unknown(Some("maven-plugin"), "jar")]
    #[case::case_sensitive(Some("WAR"), "jar")]
    #[case::empty(Some(""), "jar")]
    fn test_extension_for_packaging(#[case] packaging: Option<&str>, #[case] expected: &str) {
        assert_eq!(extension_for_packaging(packaging), expected);
    }
}
