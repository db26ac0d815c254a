use proc_macro::TokenStream;
use stencil_codegen::{GeneratorConfig, RuleKind};

/// Adds a sync status to a struct.
///
/// The struct gains a `pub sync_status: stencil::SyncStatus` field, an
/// `INITIAL_SYNC_STATUS` constant (`SyncStatus::Pending`) and a
/// `mark_changed(&mut self)` method setting the field to
/// `SyncStatus::Changed`. `SyncStatus::default()` is `Pending`, so records
/// deriving `Default` start out pending.
///
/// ```ignore
/// #[stencil::sync]
/// #[derive(Default)]
/// pub struct Note {
///     pub body: String,
/// }
///
/// let mut note = Note::default();
/// note.mark_changed();
/// ```
#[proc_macro_attribute]
pub fn sync(args: TokenStream, input: TokenStream) -> TokenStream {
    generate(RuleKind::Sync, args, input)
}

/// Binds a struct's table name to `TABLE_NAME`.
///
/// ```ignore
/// #[stencil::table_name("users")]
/// pub struct User { pub id: u64 }
///
/// assert_eq!(User::TABLE_NAME, "users");
/// ```
#[proc_macro_attribute]
pub fn table_name(args: TokenStream, input: TokenStream) -> TokenStream {
    generate(RuleKind::TableName, args, input)
}

/// Generates `create_table_sql()` for a struct.
///
/// The first argument is the table name, the optional second one the
/// primary key column. Each named field becomes a column typed after its
/// Rust type (`INTEGER`, `REAL`, `BLOB`, anything else `TEXT`).
/// `PhantomData` fields and fields marked `#[column(skip)]` are left out.
///
/// ```ignore
/// #[stencil::create_table("users", "id")]
/// pub struct User {
///     pub id: u64,
///     pub name: String,
///     #[column(skip)]
///     pub cache: Vec<String>,
/// }
///
/// assert_eq!(
///     User::create_table_sql(),
///     "CREATE TABLE users (id INTEGER, name TEXT, PRIMARY KEY (id))"
/// );
/// ```
#[proc_macro_attribute]
pub fn create_table(args: TokenStream, input: TokenStream) -> TokenStream {
    generate(RuleKind::CreateTable, args, input)
}

/// Adds `<name>_future`, returning the function's outcome as a
/// `stencil::Completion`.
///
/// Functions returning a `Result` deliver their `Err` through the
/// completion's failure channel; other functions always succeed.
///
/// Inside an `impl` block, methods are called through `self` and associated
/// functions whose signature names `Self` through `Self::name`. Use
/// `#[future_wrapper(associated)]` for other associated functions.
///
/// ```ignore
/// #[stencil::future_wrapper]
/// fn parse_port(raw: &str) -> Result<u16, std::num::ParseIntError> {
///     raw.parse()
/// }
///
/// assert_eq!(parse_port_future("8080").wait(), Ok(8080));
/// ```
#[proc_macro_attribute]
pub fn future_wrapper(args: TokenStream, input: TokenStream) -> TokenStream {
    generate(RuleKind::FutureWrapper, args, input)
}

/// Pairs an expression with its source text: `stringify_pair!(x + y)` is
/// `(x + y, "x + y")`.
#[proc_macro]
pub fn stringify_pair(input: TokenStream) -> TokenStream {
    generate(RuleKind::Stringify, input, TokenStream::new())
}

/// The moment of compilation as an RFC 3339 string literal, honouring
/// `SOURCE_DATE_EPOCH`.
#[proc_macro]
pub fn timestamp(input: TokenStream) -> TokenStream {
    generate(RuleKind::Timestamp, input, TokenStream::new())
}

fn generate(kind: RuleKind, args: TokenStream, input: TokenStream) -> TokenStream {
    let config = GeneratorConfig::from_env();
    stencil_codegen::expand(kind.as_ref(), args.into(), input.into(), &config).into()
}
