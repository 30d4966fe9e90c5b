/*!
`Env`: a document's base URI and prefix mapping, used to expand relative references and CURIEs
into absolute URIs and to qualify absolute URIs back down into CURIEs for pretty-printing.
*/

use crate::error::{Error, Result};
use loomrdf_iri::UriView;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// The base URI and prefix-name-to-namespace-URI mapping in effect at some point in a document.
/// Prefix names are unique; setting a prefix that already exists replaces its namespace in place.
///
#[derive(Clone, Debug, Default)]
pub struct Env {
    base_uri: Option<UriView>,
    prefixes: Vec<(String, UriView)>,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_uri(&self) -> Option<&UriView> {
        self.base_uri.as_ref()
    }

    /// Sets the base URI. `uri` may be relative, in which case it is resolved against the
    /// current base first; resolving with no current base set is an error.
    pub fn set_base_uri(&mut self, uri: &str) -> Result<()> {
        let candidate: UriView =
            uri.parse().map_err(|_| Error::BadUri { uri: uri.to_string() })?;
        let resolved = if candidate.is_absolute() {
            candidate
        } else {
            let base = self.base_uri.as_ref().ok_or(Error::NoBaseUri)?;
            candidate.resolve(base)?
        };
        self.base_uri = Some(resolved);
        Ok(())
    }

    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &UriView)> {
        self.prefixes.iter().map(|(name, uri)| (name.as_str(), uri))
    }

    pub fn prefix(&self, name: &str) -> Option<&UriView> {
        self.prefixes.iter().find(|(n, _)| n == name).map(|(_, uri)| uri)
    }

    /// Binds `name` to `uri`. `uri` may be relative, resolved against the current base; the
    /// result must be an absolute URI.
    pub fn set_prefix(&mut self, name: &str, uri: &str) -> Result<()> {
        let candidate: UriView =
            uri.parse().map_err(|_| Error::BadUri { uri: uri.to_string() })?;
        let resolved = if candidate.is_absolute() {
            candidate
        } else {
            let base = self
                .base_uri
                .as_ref()
                .ok_or_else(|| Error::AbsoluteIriExpected { uri: uri.to_string() })?;
            let resolved = candidate.resolve(base)?;
            if !resolved.is_absolute() {
                return Err(Error::AbsoluteIriExpected { uri: uri.to_string() });
            }
            resolved
        };
        if let Some(existing) = self.prefixes.iter_mut().find(|(n, _)| n == name) {
            existing.1 = resolved;
        } else {
            self.prefixes.push((name.to_string(), resolved));
        }
        Ok(())
    }

    /// Expands `reference` into an absolute URI: a `name:local` CURIE against a bound prefix, or
    /// a relative reference resolved against the base URI, or an already-absolute URI returned
    /// unchanged.
    pub fn expand(&self, reference: &str) -> Result<UriView> {
        if let Some((prefix, local)) = reference.split_once(':') {
            if let Some((_, namespace)) = self.prefixes.iter().find(|(name, _)| name == prefix) {
                let joined = format!("{namespace}{local}");
                return joined
                    .parse::<UriView>()
                    .map_err(|_| Error::BadUri { uri: joined });
            }
        }
        let candidate: UriView = reference
            .parse()
            .map_err(|_| Error::BadUri { uri: reference.to_string() })?;
        if candidate.is_absolute() {
            return Ok(candidate);
        }
        let base = self.base_uri.as_ref().ok_or(Error::NoBaseUri)?;
        Ok(candidate.resolve(base)?)
    }

    /// Compares two environments for set equality: the same base URI, and the same prefix names
    /// each bound to the same namespace, independent of binding order.
    pub fn equals(&self, other: &Env) -> bool {
        if self.base_uri != other.base_uri {
            return false;
        }
        if self.prefixes.len() != other.prefixes.len() {
            return false;
        }
        self.prefixes.iter().all(|(name, uri)| other.prefix(name) == Some(uri))
    }

    /// Calls `emit` once per bound prefix, passing the prefix name and its namespace URI. A
    /// caller serializing a document (for example, a writer emitting one `Prefix` event per
    /// binding) drives its own event type from this without `Env` needing to know what an event
    /// is.
    pub fn write_prefixes<F>(&self, mut emit: F)
    where
        F: FnMut(&str, &UriView),
    {
        for (name, uri) in &self.prefixes {
            emit(name, uri);
        }
    }

    /// Qualifies `uri` into a `name:local` CURIE using the longest matching bound namespace.
    /// Fails if no bound prefix is a proper textual prefix of `uri`.
    pub fn qualify(&self, uri: &UriView) -> Result<String> {
        let full = uri.to_string();
        let mut best: Option<(&str, usize)> = None;
        for (name, namespace) in &self.prefixes {
            let namespace = namespace.to_string();
            if full.len() > namespace.len() && full.starts_with(&namespace) {
                let better = best.map_or(true, |(_, len)| namespace.len() > len);
                if better {
                    best = Some((name.as_str(), namespace.len()));
                }
            }
        }
        match best {
            Some((name, len)) => Ok(format!("{name}:{}", &full[len..])),
            None => Err(Error::BadCurie { curie: full }),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_base_uri_requires_absolute_or_existing_base() {
        let mut env = Env::new();
        assert!(env.set_base_uri("relative/path").is_err());
        env.set_base_uri("http://example.com/a/").unwrap();
        env.set_base_uri("b/").unwrap();
        assert_eq!(env.base_uri().unwrap().to_string(), "http://example.com/a/b/");
    }

    #[test]
    fn set_prefix_resolves_against_base() {
        let mut env = Env::new();
        env.set_base_uri("http://example.com/ns/").unwrap();
        env.set_prefix("ex", "terms#").unwrap();
        assert_eq!(env.prefix("ex").unwrap().to_string(), "http://example.com/ns/terms#");
    }

    #[test]
    fn expand_handles_curie_relative_and_absolute_forms() {
        let mut env = Env::new();
        env.set_base_uri("http://example.com/ns/").unwrap();
        env.set_prefix("ex", "http://example.com/ns/terms#").unwrap();

        assert_eq!(env.expand("ex:Thing").unwrap().to_string(), "http://example.com/ns/terms#Thing");
        assert_eq!(env.expand("other").unwrap().to_string(), "http://example.com/ns/other");
        assert_eq!(
            env.expand("http://elsewhere.example/x").unwrap().to_string(),
            "http://elsewhere.example/x"
        );
    }

    #[test]
    fn qualify_picks_longest_matching_prefix() {
        let mut env = Env::new();
        env.set_base_uri("http://example.com/").unwrap();
        env.set_prefix("a", "http://example.com/ns/").unwrap();
        env.set_prefix("b", "http://example.com/ns/terms#").unwrap();

        assert_eq!(env.qualify(&"http://example.com/ns/terms#Thing".parse().unwrap()).unwrap(), "b:Thing");
        assert_eq!(env.qualify(&"http://example.com/ns/Other".parse().unwrap()).unwrap(), "a:Other");
    }

    #[test]
    fn qualify_fails_with_no_matching_prefix() {
        let env = Env::new();
        assert!(env.qualify(&"http://example.com/x".parse().unwrap()).is_err());
    }

    #[test]
    fn equals_ignores_binding_order() {
        let mut a = Env::new();
        a.set_base_uri("http://example.com/").unwrap();
        a.set_prefix("x", "http://example.com/x#").unwrap();
        a.set_prefix("y", "http://example.com/y#").unwrap();

        let mut b = Env::new();
        b.set_base_uri("http://example.com/").unwrap();
        b.set_prefix("y", "http://example.com/y#").unwrap();
        b.set_prefix("x", "http://example.com/x#").unwrap();

        assert!(a.equals(&b));
    }

    #[test]
    fn equals_rejects_differing_base_or_bindings() {
        let mut a = Env::new();
        a.set_base_uri("http://example.com/").unwrap();
        a.set_prefix("x", "http://example.com/x#").unwrap();

        let mut b = Env::new();
        b.set_base_uri("http://example.com/").unwrap();
        b.set_prefix("x", "http://example.com/other#").unwrap();
        assert!(!a.equals(&b));

        let mut c = Env::new();
        c.set_base_uri("http://example.org/").unwrap();
        c.set_prefix("x", "http://example.com/x#").unwrap();
        assert!(!a.equals(&c));
    }

    #[test]
    fn write_prefixes_visits_every_binding() {
        let mut env = Env::new();
        env.set_base_uri("http://example.com/").unwrap();
        env.set_prefix("a", "http://example.com/a#").unwrap();
        env.set_prefix("b", "http://example.com/b#").unwrap();

        let mut seen = Vec::new();
        env.write_prefixes(|name, uri| seen.push((name.to_string(), uri.to_string())));

        assert_eq!(
            seen,
            vec![
                ("a".to_string(), "http://example.com/a#".to_string()),
                ("b".to_string(), "http://example.com/b#".to_string()),
            ]
        );
    }
}
