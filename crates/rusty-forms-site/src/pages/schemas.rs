// File: src/pages/schemas.rs
// Purpose: One example per field kind, exercising every constraint

use super::Example;
use crate::layout::ExampleCopy;
use anyhow::Context;
use chrono::NaiveDate;
use rusty_forms::{FieldDescriptor, FormAction, SchemaDescriptor};

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("invalid date {year}-{month}-{day}"))
}

pub fn strings_schema() -> anyhow::Result<SchemaDescriptor> {
    Ok(SchemaDescriptor::builder()
        .field(FieldDescriptor::string("nonEmpty"))
        .field(FieldDescriptor::string("optional").optional())
        .field(FieldDescriptor::string("nullable").nullable())
        .field(FieldDescriptor::string("default").with_default("Foo Bar"))
        .field(FieldDescriptor::string("minLength").min_length(5))
        .field(FieldDescriptor::string("maxLength").max_length(10))
        .field(FieldDescriptor::string("email").email())
        .field(FieldDescriptor::string("url").url().label("URL"))
        .field(FieldDescriptor::string("phoneNumber").tel())
        .build()?)
}

pub fn strings() -> anyhow::Result<Example> {
    let copy = ExampleCopy {
        title: "Strings",
        description: "In this example, all sorts of string validations are performed on the client and on the server.",
        code: r#"SchemaDescriptor::builder()
    .field(FieldDescriptor::string("nonEmpty"))
    .field(FieldDescriptor::string("optional").optional())
    .field(FieldDescriptor::string("nullable").nullable())
    .field(FieldDescriptor::string("default").with_default("Foo Bar"))
    .field(FieldDescriptor::string("minLength").min_length(5))
    .field(FieldDescriptor::string("maxLength").max_length(10))
    .field(FieldDescriptor::string("email").email())
    .field(FieldDescriptor::string("url").url().label("URL"))
    .field(FieldDescriptor::string("phoneNumber").tel())
    .build()?"#,
    };
    Ok(Example::new("/examples/schemas/strings", copy, FormAction::new(strings_schema()?)))
}

pub fn numbers_schema() -> anyhow::Result<SchemaDescriptor> {
    Ok(SchemaDescriptor::builder()
        .field(FieldDescriptor::number("mandatory"))
        .field(FieldDescriptor::number("optional").optional())
        .field(FieldDescriptor::number("nullable").nullable())
        .field(FieldDescriptor::number("default").with_default(5))
        .field(FieldDescriptor::number("greaterThan").gt(5.0))
        .field(FieldDescriptor::number("greaterThanOrEqualTo").min(10.0))
        .field(FieldDescriptor::number("lowerThan").lt(5.0))
        .field(FieldDescriptor::number("lowerThanOrEqualTo").max(10.0))
        .field(FieldDescriptor::number("integer").integer())
        .build()?)
}

pub fn numbers() -> anyhow::Result<Example> {
    let copy = ExampleCopy {
        title: "Numbers",
        description: "In this example, all sorts of number validations are performed on the client and on the server.",
        code: r#"SchemaDescriptor::builder()
    .field(FieldDescriptor::number("mandatory"))
    .field(FieldDescriptor::number("optional").optional())
    .field(FieldDescriptor::number("nullable").nullable())
    .field(FieldDescriptor::number("default").with_default(5))
    .field(FieldDescriptor::number("greaterThan").gt(5.0))
    .field(FieldDescriptor::number("greaterThanOrEqualTo").min(10.0))
    .field(FieldDescriptor::number("lowerThan").lt(5.0))
    .field(FieldDescriptor::number("lowerThanOrEqualTo").max(10.0))
    .field(FieldDescriptor::number("integer").integer())
    .build()?"#,
    };
    Ok(Example::new("/examples/schemas/numbers", copy, FormAction::new(numbers_schema()?)))
}

pub fn booleans_schema() -> anyhow::Result<SchemaDescriptor> {
    Ok(SchemaDescriptor::builder()
        .field(FieldDescriptor::boolean("mandatory"))
        .field(FieldDescriptor::boolean("optional").optional())
        .field(FieldDescriptor::boolean("nullable").nullable())
        .field(FieldDescriptor::boolean("defaultFalse").with_default(false))
        .field(FieldDescriptor::boolean("defaultTrue").with_default(true))
        .build()?)
}

pub fn booleans() -> anyhow::Result<Example> {
    let copy = ExampleCopy {
        title: "Booleans",
        description: "In this example, all sorts of boolean schemas are rendered as checkboxes. An unchecked box submits nothing and validates to false.",
        code: r#"SchemaDescriptor::builder()
    .field(FieldDescriptor::boolean("mandatory"))
    .field(FieldDescriptor::boolean("optional").optional())
    .field(FieldDescriptor::boolean("nullable").nullable())
    .field(FieldDescriptor::boolean("defaultFalse").with_default(false))
    .field(FieldDescriptor::boolean("defaultTrue").with_default(true))
    .build()?"#,
    };
    Ok(Example::new("/examples/schemas/booleans", copy, FormAction::new(booleans_schema()?)))
}

pub fn dates_schema() -> anyhow::Result<SchemaDescriptor> {
    Ok(SchemaDescriptor::builder()
        .field(FieldDescriptor::date("mandatory"))
        .field(FieldDescriptor::date("optional").optional())
        .field(FieldDescriptor::date("nullable").nullable())
        .field(FieldDescriptor::date("default").with_default(date(2022, 1, 1)?))
        .field(FieldDescriptor::date("minDate").min_date(date(2000, 1, 1)?))
        .field(FieldDescriptor::date("maxDate").max_date(date(2030, 12, 31)?))
        .build()?)
}

pub fn dates() -> anyhow::Result<Example> {
    let copy = ExampleCopy {
        title: "Dates",
        description: "In this example, dates are rendered as date inputs and checked against their bounds.",
        code: r#"SchemaDescriptor::builder()
    .field(FieldDescriptor::date("mandatory"))
    .field(FieldDescriptor::date("optional").optional())
    .field(FieldDescriptor::date("nullable").nullable())
    .field(FieldDescriptor::date("default").with_default("2022-01-01".parse::<NaiveDate>()?))
    .field(FieldDescriptor::date("minDate").min_date("2000-01-01".parse::<NaiveDate>()?))
    .field(FieldDescriptor::date("maxDate").max_date("2030-12-31".parse::<NaiveDate>()?))
    .build()?"#,
    };
    Ok(Example::new("/examples/schemas/dates", copy, FormAction::new(dates_schema()?)))
}
