//! Minimal Turtle graph
//!
//! Triples are kept in insertion order and de-duplicated. Rendering writes the
//! prefix declarations followed by one block per subject, in the order the
//! subjects first appeared. The same graph also renders as N-Triples, one
//! statement per line with full IRIs.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

/// IRIs of the vocabularies the renderers use
pub mod vocab {
    /// Namespace of generated features, geometries and their classes
    pub const SPATIAL_NS: &str = "http://dl-learner.org/spatial#";
    /// Namespace of the trace ontology
    pub const SPATIAL_ONT_NS: &str = "http://dl-learner.org/ont/spatial#";
    /// Namespace of trace resources
    pub const SPATIAL_RES_NS: &str = "http://dl-learner.org/res/spatial#";
    /// GeoSPARQL namespace
    pub const GEO_NS: &str = "http://www.opengis.net/ont/geosparql#";
    /// RDF namespace
    pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace
    pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// OWL namespace
    pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";
    /// XML Schema datatypes namespace
    pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";

    /// `rdf:type`
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdfs:subClassOf`
    pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    /// `rdfs:domain`
    pub const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
    /// `rdfs:range`
    pub const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
    /// `owl:Class`
    pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    /// `owl:ObjectProperty`
    pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    /// `owl:DatatypeProperty`
    pub const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
    /// `xsd:double`
    pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    /// `geo:hasGeometry`
    pub const GEO_HAS_GEOMETRY: &str = "http://www.opengis.net/ont/geosparql#hasGeometry";
    /// `geo:asWKT`
    pub const GEO_AS_WKT: &str = "http://www.opengis.net/ont/geosparql#asWKT";
    /// `geo:wktLiteral`
    pub const GEO_WKT_LITERAL: &str = "http://www.opengis.net/ont/geosparql#wktLiteral";
    /// `geo:Geometry`
    pub const GEO_GEOMETRY: &str = "http://www.opengis.net/ont/geosparql#Geometry";
    /// Feature-to-geometry link of the GeoVocab vocabulary
    pub const GEOVOCAB_GEOMETRY: &str = "http://geovocab.org/geometry#geometry";

    /// Full IRI of a local name in the spatial namespace
    pub fn spatial(local: &str) -> String {
        format!("{}{}", SPATIAL_NS, local)
    }
}

/// Object position of a triple
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A resource
    Iri(String),
    /// A typed literal
    Literal {
        /// Lexical form
        value: String,
        /// Datatype IRI
        datatype: String,
    },
}

impl Term {
    /// A resource term
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// A typed literal term
    pub fn literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal { value: value.into(), datatype: datatype.into() }
    }

    /// A `geo:wktLiteral`
    pub fn wkt(wkt: impl Into<String>) -> Self {
        Self::literal(wkt, vocab::GEO_WKT_LITERAL)
    }

    /// An `xsd:double` literal
    pub fn double(value: f64) -> Self {
        Self::literal(value.to_string(), vocab::XSD_DOUBLE)
    }
}

/// A single statement with IRI subject and predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject IRI
    pub subject: String,
    /// Predicate IRI
    pub predicate: String,
    /// Object
    pub object: Term,
}

/// Insertion-ordered set of triples with prefix bindings
#[derive(Debug, Clone, Default)]
pub struct TurtleGraph {
    prefixes: Vec<(String, String)>,
    triples: Vec<Triple>,
    seen: HashSet<Triple>,
}

impl TurtleGraph {
    /// An empty graph without prefixes
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty graph with the prefixes the renderers abbreviate to
    pub fn with_default_prefixes() -> Self {
        Self::new()
            .with_prefix("sp", vocab::SPATIAL_NS)
            .with_prefix("geo", vocab::GEO_NS)
            .with_prefix("rdf", vocab::RDF_NS)
            .with_prefix("rdfs", vocab::RDFS_NS)
            .with_prefix("owl", vocab::OWL_NS)
            .with_prefix("xsd", vocab::XSD_NS)
    }

    /// Bind `name` to `namespace`
    pub fn with_prefix(mut self, name: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.prefixes.push((name.into(), namespace.into()));
        self
    }

    /// Add a triple; returns `false` when it was already present
    pub fn add(
        &mut self,
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: Term,
    ) -> bool {
        let triple = Triple { subject: subject.into(), predicate: predicate.into(), object };
        if !self.seen.insert(triple.clone()) {
            return false;
        }
        self.triples.push(triple);
        true
    }

    /// Add `subject rdf:type class`
    pub fn add_type(&mut self, subject: impl Into<String>, class: impl Into<String>) -> bool {
        self.add(subject, vocab::RDF_TYPE, Term::Iri(class.into()))
    }

    /// Add every triple of `other`, keeping its order
    pub fn merge(&mut self, other: TurtleGraph) {
        for triple in other.triples {
            self.add(triple.subject, triple.predicate, triple.object);
        }
    }

    /// Triples in insertion order
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Number of distinct triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Whether the graph holds no triple
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Whether the exact triple is present
    pub fn contains(&self, subject: &str, predicate: &str, object: &Term) -> bool {
        self.seen.contains(&Triple {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: object.clone(),
        })
    }

    /// Render as Turtle
    pub fn to_turtle(&self) -> String {
        let mut out = String::new();

        for (name, namespace) in &self.prefixes {
            let _ = writeln!(out, "@prefix {}: <{}> .", name, namespace);
        }
        if !self.prefixes.is_empty() {
            out.push('\n');
        }

        let mut order: Vec<&str> = Vec::new();
        let mut by_subject: HashMap<&str, Vec<&Triple>> = HashMap::new();
        for triple in &self.triples {
            by_subject
                .entry(triple.subject.as_str())
                .or_insert_with(|| {
                    order.push(triple.subject.as_str());
                    Vec::new()
                })
                .push(triple);
        }

        for subject in order {
            let Some(triples) = by_subject.get(subject) else { continue };
            out.push_str(&self.abbreviate(subject));

            for (i, triple) in triples.iter().enumerate() {
                let predicate = if triple.predicate == vocab::RDF_TYPE {
                    "a".to_string()
                } else {
                    self.abbreviate(&triple.predicate)
                };
                let separator = if i == 0 { " " } else { " ;\n    " };
                let _ = write!(out, "{}{} {}", separator, predicate, self.render_term(&triple.object));
            }
            out.push_str(" .\n\n");
        }

        out
    }

    /// Render as N-Triples, in insertion order
    pub fn to_ntriples(&self) -> String {
        let mut out = String::new();
        for triple in &self.triples {
            let object = match &triple.object {
                Term::Iri(iri) => ntriples_resource(iri),
                Term::Literal { value, datatype } => {
                    format!("\"{}\"^^<{}>", escape_literal(value), datatype)
                }
            };
            let _ = writeln!(
                out,
                "{} <{}> {} .",
                ntriples_resource(&triple.subject),
                triple.predicate,
                object
            );
        }
        out
    }

    fn render_term(&self, term: &Term) -> String {
        match term {
            Term::Iri(iri) => self.abbreviate(iri),
            Term::Literal { value, datatype } => {
                format!("\"{}\"^^{}", escape_literal(value), self.abbreviate(datatype))
            }
        }
    }

    /// `prefix:local` when a bound namespace covers `iri`, `<iri>` otherwise
    fn abbreviate(&self, iri: &str) -> String {
        for (name, namespace) in &self.prefixes {
            if let Some(local) = iri.strip_prefix(namespace.as_str()) {
                if is_local_name(local) {
                    return format!("{}:{}", name, local);
                }
            }
        }
        format!("<{}>", iri)
    }
}

fn is_local_name(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Blank node labels stay bare, everything else is wrapped in angle brackets
fn ntriples_resource(resource: &str) -> String {
    if resource.starts_with("_:") {
        resource.to_string()
    } else {
        format!("<{}>", resource)
    }
}

fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}
