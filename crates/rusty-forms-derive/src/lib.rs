// File: rusty-forms-derive/src/lib.rs
// Purpose: #[derive(FormSchema)] entry point

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod schema;

/// Derive `rusty_forms::FormSchema` for a struct with named fields
///
/// Field kinds follow the Rust type: `String` is a string, integers are
/// integer numbers, floats are numbers, `bool` is a checkbox and
/// `NaiveDate` is a date. `Option<T>` makes the field optional.
///
/// ```ignore
/// #[derive(FormSchema)]
/// #[rename_all("camelCase")]
/// struct Signup {
///     #[min_length(2)]
///     first_name: String,
///
///     #[email]
///     email: String,
///
///     #[enum_values("fromAFriend", "google")]
///     how_you_found_out_about_us: String,
///
///     #[min(18)] #[max(120)]
///     age: i32,
///
///     #[default_value(true)]
///     newsletter: bool,
/// }
/// ```
#[proc_macro_derive(FormSchema, attributes(
    email, url, tel,
    min_length, max_length, regex,
    min, max, gt, lt, integer,
    min_date, max_date,
    nullable, default_value, enum_values,
    label, rename, rename_all
))]
pub fn derive_form_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    schema::impl_form_schema(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
