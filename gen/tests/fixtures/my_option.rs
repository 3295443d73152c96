// @generated by argbind from schema `my-option`. Do not edit by hand.
// fingerprint: <fingerprint>

use std::fmt;
use std::sync::LazyLock;

use argbind_core::{FieldSchema, Schema, Value, ValueType};
use argbind_parser::ArgError;

static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("my-option")
        .field(FieldSchema::flag(Some('f'), Some("foo")))
        .field(FieldSchema::counter(Some('v'), Some("verbose")))
        .field(FieldSchema::valued(Some('b'), Some("bar"), ValueType::Int).with_default(Value::Int(123)))
        .field(FieldSchema::valued(None, Some("qwer"), ValueType::String))
        .field(FieldSchema::positional("hahaha", ValueType::String))
        .field(FieldSchema::positional_list("asdf"))
        .build()
        .expect("generated schema must be valid")
});

#[derive(Debug, Clone)]
pub struct MyOption {
    pub asdf: Vec<String>,
    pub bar: i64,
    pub foo: bool,
    pub hahaha: String,
    pub qwer: String,
    pub verbose: u32,
}

impl MyOption {
    /// Schema the struct is parsed against.
    pub fn schema() -> &'static Schema {
        &SCHEMA
    }

    /// Parses command line tokens, excluding the program name.
    pub fn parse_args<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ArgError> {
        let args = argbind_parser::parse(tokens, Self::schema())?;
        Ok(Self {
            asdf: args.list("asdf").unwrap_or_default().to_vec(),
            bar: args.int("bar").unwrap_or_default(),
            foo: args.flag("foo"),
            hahaha: args.string("hahaha").unwrap_or_default().to_string(),
            qwer: args.string("qwer").unwrap_or_default().to_string(),
            verbose: args.count("verbose"),
        })
    }
}

impl PartialEq for MyOption {
    fn eq(&self, other: &Self) -> bool {
        self.asdf == other.asdf
            && self.bar == other.bar
            && self.foo == other.foo
            && self.hahaha == other.hahaha
            && self.qwer == other.qwer
            && self.verbose == other.verbose
    }
}

impl Eq for MyOption {}

impl fmt::Display for MyOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<MyOption")?;
        write!(f, " foo={}", self.foo)?;
        write!(f, " verbose={}", self.verbose)?;
        write!(f, " bar={}", self.bar)?;
        write!(f, " qwer={:?}", self.qwer)?;
        write!(f, " hahaha={:?}", self.hahaha)?;
        write!(f, " asdf={:?}", self.asdf)?;
        write!(f, ">")
    }
}
