use crate::Result;
use serde::Serialize;

const DOMAIN_PLACEHOLDER: &str = "{domain}";

// region:        --- Source info

/// How the body returned by a source must be searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceKind {
    /// JSON document of unknown shape.
    Structured,
    /// Raw text, HTML or CSV-like output.
    Unstructured,
}

#[derive(Debug, Clone, Serialize)]
pub struct Source {
    name: String,
    description: String,
    url_template: String,
    kind: SourceKind,
}

impl Source {
    pub fn new(name: &str, description: &str, url_template: &str, kind: SourceKind) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            url_template: url_template.to_string(),
            kind,
        }
    }

    pub fn name(&self) -> String {
        format!("sources/{}", self.name)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Every occurrence of `{domain}` in the template is replaced, nothing is encoded.
    pub fn query_url(&self, domain: &str) -> String {
        self.url_template.replace(DOMAIN_PLACEHOLDER, domain)
    }
}

// endregion:     --- Source info

pub fn registry() -> Vec<Source> {
    use SourceKind::*;

    vec![
        Source::new(
            "bufferover",
            "Use dns.bufferover.run to find subdomains",
            "https://dns.bufferover.run/dns?q=.{domain}",
            Structured,
        ),
        Source::new(
            "riddler",
            "Use riddler.io CSV export to find subdomains",
            "https://riddler.io/search/exportcsv?q=pld:{domain}",
            Unstructured,
        ),
        Source::new(
            "certspotter",
            "Use certspotter issuances to find subdomains",
            "https://api.certspotter.com/v1/issuances?domain={domain}&include_subdomains=true&expand=dns_names",
            Structured,
        ),
        Source::new(
            "webarchive",
            "Use web.archive.org to find subdomains",
            "http://web.archive.org/cdx/search/cdx?url=*.{domain}/*&output=text&fl=original&collapse=urlkey",
            Unstructured,
        ),
        Source::new(
            "crtsh",
            "Use crt.sh/ to find subdomains",
            "https://crt.sh/?q=%25.{domain}&output=json",
            Structured,
        ),
        Source::new(
            "anubis",
            "Use jldc.me anubis to find subdomains",
            "https://jldc.me/anubis/subdomains/{domain}",
            Unstructured,
        ),
        Source::new(
            "threatminer",
            "Use threatminer.org to find subdomains",
            "https://api.threatminer.org/v2/domain.php?q={domain}&rt=5",
            Unstructured,
        ),
        Source::new(
            "alienvault",
            "Use AlienVault OTX url list to find subdomains",
            "https://otx.alienvault.com/api/v1/indicators/domain/{domain}/url_list?limit=100&page=1",
            Unstructured,
        ),
        Source::new(
            "hackertarget",
            "Use hackertarget.com host search to find subdomains",
            "https://api.hackertarget.com/hostsearch/?q={domain}",
            Unstructured,
        ),
    ]
}

/// The whole catalog as a JSON array, templates included.
pub fn catalog_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&registry())?)
}

pub fn display_all() {
    println!("\nSubdomains sources");
    for source in registry() {
        println!(
            "- {:25}{:15}{}",
            source.name(),
            format!("{:?}", source.kind()),
            source.description()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_and_kinds() {
        let kinds: Vec<SourceKind> = registry().iter().map(|source| source.kind()).collect();

        assert_eq!(9, kinds.len());
        assert_eq!(
            vec![
                SourceKind::Structured,
                SourceKind::Unstructured,
                SourceKind::Structured,
                SourceKind::Unstructured,
                SourceKind::Structured,
                SourceKind::Unstructured,
                SourceKind::Unstructured,
                SourceKind::Unstructured,
                SourceKind::Unstructured,
            ],
            kinds
        );
    }

    #[test]
    fn every_template_takes_the_domain() {
        for source in registry() {
            let url = source.query_url("example.com");
            assert!(url.contains("example.com"), "{}", source.name());
            assert!(!url.contains(DOMAIN_PLACEHOLDER));
        }
    }

    #[test]
    fn catalog_as_json() {
        let catalog: serde_json::Value = serde_json::from_str(&catalog_json().unwrap()).unwrap();
        let entries = catalog.as_array().unwrap();

        assert_eq!(9, entries.len());
        assert_eq!("bufferover", entries[0]["name"]);
        assert_eq!("Structured", entries[0]["kind"]);
        assert_eq!("Unstructured", entries[8]["kind"]);
        assert_eq!(
            "https://api.hackertarget.com/hostsearch/?q={domain}",
            entries[8]["url_template"]
        );
    }

    #[test]
    fn query_url_keeps_percent_escapes() {
        let crtsh = registry()
            .into_iter()
            .find(|source| source.name() == "sources/crtsh")
            .unwrap();

        assert_eq!(
            "https://crt.sh/?q=%25.example.com&output=json",
            crtsh.query_url("example.com")
        );
    }
}
