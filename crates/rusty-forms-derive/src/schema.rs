// File: rusty-forms-derive/src/schema.rs
// Purpose: Field attribute parsing and FormSchema code generation

use proc_macro2::TokenStream;
use quote::quote;
use std::collections::HashSet;
use syn::punctuated::Punctuated;
use syn::{
    Attribute, Data, DeriveInput, Expr, ExprLit, ExprUnary, Fields, GenericArgument, Lit,
    PathArguments, Token, Type, UnOp,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    String,
    Number,
    Boolean,
    Date,
    Enum,
}

impl Kind {
    fn tokens(self) -> TokenStream {
        match self {
            Kind::String => quote!(::rusty_forms::FieldKind::String),
            Kind::Number => quote!(::rusty_forms::FieldKind::Number),
            Kind::Boolean => quote!(::rusty_forms::FieldKind::Boolean),
            Kind::Date => quote!(::rusty_forms::FieldKind::Date),
            Kind::Enum => quote!(::rusty_forms::FieldKind::Enum),
        }
    }
}

#[derive(Debug, Clone)]
enum ConstraintAttr {
    MinLength(usize),
    MaxLength(usize),
    Regex(String, String),
    Min(f64),
    Max(f64),
    Gt(f64),
    Lt(f64),
    Integer,
    Email,
    Url,
    Tel,
    MinDate(i32, u32, u32),
    MaxDate(i32, u32, u32),
}

impl ConstraintAttr {
    fn applies_to(&self, kind: Kind) -> bool {
        match self {
            ConstraintAttr::MinLength(_)
            | ConstraintAttr::MaxLength(_)
            | ConstraintAttr::Regex(..)
            | ConstraintAttr::Email
            | ConstraintAttr::Url
            | ConstraintAttr::Tel => kind == Kind::String,
            ConstraintAttr::Min(_)
            | ConstraintAttr::Max(_)
            | ConstraintAttr::Gt(_)
            | ConstraintAttr::Lt(_)
            | ConstraintAttr::Integer => kind == Kind::Number,
            ConstraintAttr::MinDate(..) | ConstraintAttr::MaxDate(..) => kind == Kind::Date,
        }
    }

    fn tokens(&self) -> TokenStream {
        match self {
            ConstraintAttr::MinLength(n) => quote!(::rusty_forms::Constraint::MinLength { value: #n }),
            ConstraintAttr::MaxLength(n) => quote!(::rusty_forms::Constraint::MaxLength { value: #n }),
            ConstraintAttr::Regex(regex, message) => quote! {
                ::rusty_forms::Constraint::Pattern {
                    regex: #regex.to_string(),
                    message: #message.to_string(),
                }
            },
            ConstraintAttr::Min(n) => quote!(::rusty_forms::Constraint::Min { value: #n }),
            ConstraintAttr::Max(n) => quote!(::rusty_forms::Constraint::Max { value: #n }),
            ConstraintAttr::Gt(n) => quote!(::rusty_forms::Constraint::Gt { value: #n }),
            ConstraintAttr::Lt(n) => quote!(::rusty_forms::Constraint::Lt { value: #n }),
            ConstraintAttr::Integer => quote!(::rusty_forms::Constraint::Integer),
            ConstraintAttr::Email => quote!(::rusty_forms::Constraint::Email),
            ConstraintAttr::Url => quote!(::rusty_forms::Constraint::Url),
            ConstraintAttr::Tel => quote!(::rusty_forms::Constraint::Tel),
            ConstraintAttr::MinDate(y, m, d) => {
                let date = date_tokens(*y, *m, *d);
                quote!(::rusty_forms::Constraint::MinDate { value: #date })
            }
            ConstraintAttr::MaxDate(y, m, d) => {
                let date = date_tokens(*y, *m, *d);
                quote!(::rusty_forms::Constraint::MaxDate { value: #date })
            }
        }
    }
}

fn date_tokens(y: i32, m: u32, d: u32) -> TokenStream {
    // `lit_date` only accepts calendar dates, so the `None` arm is dead
    quote! {
        match ::rusty_forms::chrono::NaiveDate::from_ymd_opt(#y, #m, #d) {
            ::core::option::Option::Some(date) => date,
            ::core::option::Option::None => unreachable!("date literal checked by #[derive(FormSchema)]"),
        }
    }
}

#[derive(Debug, Clone)]
enum DefaultAttr {
    Text(String),
    Number(f64),
    Bool(bool),
}

#[derive(Default)]
struct FieldAttrs {
    constraints: Vec<(ConstraintAttr, Attribute)>,
    nullable: bool,
    default: Option<DefaultAttr>,
    enum_values: Option<Vec<String>>,
    label: Option<String>,
    rename: Option<String>,
}

/// Parse the helper attributes on one field
fn extract_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();

    for attr in attrs {
        let name = match attr.path().segments.last() {
            Some(segment) => segment.ident.to_string(),
            None => continue,
        };

        let constraint = match name.as_str() {
            "email" => Some(ConstraintAttr::Email),
            "url" => Some(ConstraintAttr::Url),
            "tel" => Some(ConstraintAttr::Tel),
            "integer" => Some(ConstraintAttr::Integer),
            "min_length" => Some(ConstraintAttr::MinLength(lit_usize(&single_arg(attr)?)?)),
            "max_length" => Some(ConstraintAttr::MaxLength(lit_usize(&single_arg(attr)?)?)),
            "min" => Some(ConstraintAttr::Min(lit_f64(&single_arg(attr)?)?)),
            "max" => Some(ConstraintAttr::Max(lit_f64(&single_arg(attr)?)?)),
            "gt" => Some(ConstraintAttr::Gt(lit_f64(&single_arg(attr)?)?)),
            "lt" => Some(ConstraintAttr::Lt(lit_f64(&single_arg(attr)?)?)),
            "min_date" => {
                let (y, m, d) = lit_date(&single_arg(attr)?)?;
                Some(ConstraintAttr::MinDate(y, m, d))
            }
            "max_date" => {
                let (y, m, d) = lit_date(&single_arg(attr)?)?;
                Some(ConstraintAttr::MaxDate(y, m, d))
            }
            "regex" => {
                // regex("pattern") or regex("pattern", "message")
                let args = parse_args(attr)?;
                let (pattern, message) = match args.as_slice() {
                    [pattern] => (lit_str(pattern)?, "Invalid format".to_string()),
                    [pattern, message] => (lit_str(pattern)?, lit_str(message)?),
                    _ => {
                        return Err(syn::Error::new_spanned(
                            attr,
                            "`regex` takes a pattern and an optional message",
                        ))
                    }
                };
                Some(ConstraintAttr::Regex(pattern, message))
            }
            "nullable" => {
                out.nullable = true;
                None
            }
            "default_value" => {
                out.default = Some(lit_default(&single_arg(attr)?)?);
                None
            }
            "enum_values" => {
                let values = parse_args(attr)?
                    .iter()
                    .map(lit_str)
                    .collect::<syn::Result<Vec<_>>>()?;
                if values.is_empty() {
                    return Err(syn::Error::new_spanned(
                        attr,
                        "`enum_values` needs at least one value",
                    ));
                }
                out.enum_values = Some(values);
                None
            }
            "label" => {
                out.label = Some(lit_str(&single_arg(attr)?)?);
                None
            }
            "rename" => {
                out.rename = Some(lit_str(&single_arg(attr)?)?);
                None
            }
            _ => None,
        };

        if let Some(constraint) = constraint {
            out.constraints.push((constraint, attr.clone()));
        }
    }

    Ok(out)
}

/// Generate the FormSchema impl for a struct
pub fn impl_form_schema(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "FormSchema only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "FormSchema only supports structs",
            ))
        }
    };

    let camel_case = rename_all(&input.attrs)?;
    let mut seen = HashSet::new();
    let mut descriptors = Vec::new();

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let attrs = extract_field_attrs(&field.attrs)?;

        let field_name = match &attrs.rename {
            Some(rename) => rename.clone(),
            None if camel_case => to_camel_case(&ident.to_string()),
            None => ident.to_string(),
        };
        if !seen.insert(field_name.clone()) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("duplicate form field name `{}`", field_name),
            ));
        }

        let (inner, optional) = match option_inner(&field.ty) {
            Some(inner) => (inner, true),
            None => (&field.ty, false),
        };

        let (kind, is_integer) = if attrs.enum_values.is_some() {
            (Kind::Enum, false)
        } else {
            kind_for(inner).ok_or_else(|| {
                syn::Error::new_spanned(
                    &field.ty,
                    "unsupported form field type; expected String, a number, bool or NaiveDate",
                )
            })?
        };

        let mut constraints: Vec<TokenStream> = Vec::new();
        for (constraint, attr) in &attrs.constraints {
            if !constraint.applies_to(kind) {
                return Err(syn::Error::new_spanned(
                    attr,
                    format!("this constraint does not apply to field `{}`", field_name),
                ));
            }
            constraints.push(constraint.tokens());
        }
        if is_integer && !attrs
            .constraints
            .iter()
            .any(|(c, _)| matches!(c, ConstraintAttr::Integer))
        {
            constraints.push(ConstraintAttr::Integer.tokens());
        }

        let kind_tokens = kind.tokens();
        let required = !optional;
        let nullable = attrs.nullable;

        let enum_values = match &attrs.enum_values {
            Some(values) => quote! {
                field.enum_values = Some(vec![
                    #(::rusty_forms::EnumOption::from_value(#values)),*
                ]);
            },
            None => quote! {},
        };

        let label = match &attrs.label {
            Some(label) => quote! { field.label = Some(#label.to_string()); },
            None => quote! {},
        };

        let default = match &attrs.default {
            Some(DefaultAttr::Text(s)) => {
                quote! { field.default = Some(::rusty_forms::Value::Text(#s.to_string())); }
            }
            Some(DefaultAttr::Number(n)) => {
                quote! { field.default = Some(::rusty_forms::Value::Number(#n)); }
            }
            Some(DefaultAttr::Bool(b)) => {
                quote! { field.default = Some(::rusty_forms::Value::Bool(#b)); }
            }
            None => quote! {},
        };

        descriptors.push(quote! {
            {
                let mut field = ::rusty_forms::FieldDescriptor::new(#field_name, #kind_tokens);
                field.required = #required;
                field.nullable = #nullable;
                #(field.constraints.push(#constraints);)*
                #enum_values
                #label
                #default
                field
            }
        });
    }

    let name_str = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::rusty_forms::FormSchema for #name #ty_generics #where_clause {
            fn schema() -> ::rusty_forms::SchemaDescriptor {
                match ::rusty_forms::SchemaDescriptor::new(vec![#(#descriptors),*]) {
                    Ok(schema) => schema,
                    Err(e) => panic!("invalid form schema on `{}`: {}", #name_str, e),
                }
            }
        }
    })
}

/// `#[rename_all("camelCase")]` on the struct
fn rename_all(attrs: &[Attribute]) -> syn::Result<bool> {
    for attr in attrs {
        if attr.path().is_ident("rename_all") {
            let style = lit_str(&single_arg(attr)?)?;
            return match style.as_str() {
                "camelCase" => Ok(true),
                "snake_case" => Ok(false),
                _ => Err(syn::Error::new_spanned(
                    attr,
                    "`rename_all` supports \"camelCase\" and \"snake_case\"",
                )),
            };
        }
    }
    Ok(false)
}

fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.trim_start_matches('_').chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `T` when the type is `Option<T>`
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(GenericArgument::Type(inner)) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

/// Field kind for a Rust type, and whether it is an integer type
fn kind_for(ty: &Type) -> Option<(Kind, bool)> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let ident = type_path.path.segments.last()?.ident.to_string();
    match ident.as_str() {
        "String" => Some((Kind::String, false)),
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
        | "u128" | "usize" => Some((Kind::Number, true)),
        "f32" | "f64" => Some((Kind::Number, false)),
        "bool" => Some((Kind::Boolean, false)),
        "NaiveDate" => Some((Kind::Date, false)),
        _ => None,
    }
}

fn parse_args(attr: &Attribute) -> syn::Result<Vec<Expr>> {
    attr.parse_args_with(Punctuated::<Expr, Token![,]>::parse_terminated)
        .map(|args| args.into_iter().collect())
}

fn single_arg(attr: &Attribute) -> syn::Result<Expr> {
    let mut args = parse_args(attr)?;
    if args.len() != 1 {
        return Err(syn::Error::new_spanned(attr, "expected exactly one argument"));
    }
    Ok(args.remove(0))
}

fn lit_str(expr: &Expr) -> syn::Result<String> {
    match expr {
        Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => Ok(s.value()),
        _ => Err(syn::Error::new_spanned(expr, "expected a string literal")),
    }
}

fn lit_usize(expr: &Expr) -> syn::Result<usize> {
    match expr {
        Expr::Lit(ExprLit { lit: Lit::Int(i), .. }) => i.base10_parse::<usize>(),
        _ => Err(syn::Error::new_spanned(expr, "expected an integer literal")),
    }
}

fn lit_f64(expr: &Expr) -> syn::Result<f64> {
    match expr {
        Expr::Lit(ExprLit { lit: Lit::Int(i), .. }) => i.base10_parse::<f64>(),
        Expr::Lit(ExprLit { lit: Lit::Float(f), .. }) => f.base10_parse::<f64>(),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => lit_f64(inner).map(|n| -n),
        _ => Err(syn::Error::new_spanned(expr, "expected a number literal")),
    }
}

fn lit_default(expr: &Expr) -> syn::Result<DefaultAttr> {
    match expr {
        Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => Ok(DefaultAttr::Text(s.value())),
        Expr::Lit(ExprLit { lit: Lit::Bool(b), .. }) => Ok(DefaultAttr::Bool(b.value)),
        _ => lit_f64(expr)
            .map(DefaultAttr::Number)
            .map_err(|_| syn::Error::new_spanned(expr, "expected a string, number or bool literal")),
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// `"YYYY-MM-DD"` naming a day that exists in the calendar
fn lit_date(expr: &Expr) -> syn::Result<(i32, u32, u32)> {
    let text = lit_str(expr)?;
    let invalid = || syn::Error::new_spanned(expr, "expected a date as \"YYYY-MM-DD\"");

    let mut parts = text.splitn(3, '-');
    let year = parts.next().and_then(|p| p.parse::<i32>().ok()).ok_or_else(invalid)?;
    let month = parts.next().and_then(|p| p.parse::<u32>().ok()).ok_or_else(invalid)?;
    let day = parts.next().and_then(|p| p.parse::<u32>().ok()).ok_or_else(invalid)?;

    if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        return Err(syn::Error::new_spanned(
            expr,
            format!("`{}` is not a calendar date", text),
        ));
    }
    Ok((year, month, day))
}
