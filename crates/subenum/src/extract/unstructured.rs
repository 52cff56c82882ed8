use super::SubdomainSet;
use regex::bytes::Regex;
use tracing::trace;

/// `<word chars, dots, hyphens>.<domain>`, the domain taken literally.
///
/// The word class is ASCII only and the match is case sensitive.
pub fn pattern(domain: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?-u:[\w.-])+\.{}", regex::escape(domain)))
}

pub fn extract(pattern: &Regex, body: &[u8], subdomains: &mut SubdomainSet) {
    for found in pattern.find_iter(body) {
        // the class is ASCII and the suffix comes from a &str, so this is lossless
        let candidate = String::from_utf8_lossy(found.as_bytes()).into_owned();
        trace!("Collecting: {:?}", candidate);
        subdomains.insert(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(domain: &str, body: &[u8]) -> SubdomainSet {
        let mut subdomains = SubdomainSet::new();
        extract(&pattern(domain).unwrap(), body, &mut subdomains);
        subdomains
    }

    fn set(items: &[&str]) -> SubdomainSet {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn free_text() {
        let subdomains = run("example.com", b"see sub1.example.com and SUB2.example.com here");

        // uppercase labels are word characters, only the domain suffix is case sensitive
        assert_eq!(set(&["sub1.example.com", "SUB2.example.com"]), subdomains);
    }

    #[test]
    fn suffix_is_case_sensitive() {
        assert!(run("example.com", b"www.EXAMPLE.com www.Example.Com").is_empty());
    }

    #[test]
    fn bare_domain_is_not_a_match() {
        assert!(run("example.com", b"example.com, .example.com").is_empty());
    }

    #[test]
    fn csv_and_urls() {
        let body = b"host,ip\nwww.example.com,1.2.3.4\nhttp://dev-1.api.example.com/login?x=1\n";

        assert_eq!(
            set(&["www.example.com", "dev-1.api.example.com"]),
            run("example.com", body)
        );
    }

    #[test]
    fn longest_non_overlapping_matches() {
        assert_eq!(
            set(&["a.b.example.com"]),
            run("example.com", b"a.b.example.com")
        );
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let subdomains = run("a+b.com", b"x.a+b.com y.aab.com z.aaab.com w.a+bxcom");

        assert_eq!(set(&["x.a+b.com"]), subdomains);
    }

    #[test]
    fn dot_in_domain_is_literal() {
        assert!(run("example.com", b"www.exampleXcom").is_empty());
    }

    #[test]
    fn non_utf8_body() {
        let mut body = vec![0xff, 0xfe, b' '];
        body.extend_from_slice(b"ok.example.com");
        body.push(0xc3);

        assert_eq!(set(&["ok.example.com"]), run("example.com", &body));
    }
}
