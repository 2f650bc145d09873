// File: src/pages/forms.rs
// Purpose: Examples for customizing the rendered form

use super::{Example, Signup};
use crate::layout::ExampleCopy;
use maud::{html, Markup};
use rusty_forms::{
    EnumOption, Form, FormAction, FormSchema, Overrides, SchemaDescriptor, SubmissionResult,
};

fn labels_and_options_form(
    schema: &SchemaDescriptor,
    result: Option<&SubmissionResult>,
    token: &str,
) -> Markup {
    let overrides = Overrides::new().label("email", "E-mail Address").options(
        "howYouFoundOutAboutUs",
        vec![
            EnumOption::new("A Friend", "fromAFriend"),
            EnumOption::new("Search Engine", "google"),
        ],
    );

    Form::new(schema)
        .overrides(overrides)
        .result(result)
        .instance(token)
        .render()
}

pub fn labels_and_options() -> anyhow::Result<Example> {
    let copy = ExampleCopy {
        title: "Labels and options",
        description: "In this example, we add a custom label to a field and custom options to our select. The rest is inferred from the schema.",
        code: r#"let overrides = Overrides::new()
    .label("email", "E-mail Address")
    .options(
        "howYouFoundOutAboutUs",
        vec![
            EnumOption::new("A Friend", "fromAFriend"),
            EnumOption::new("Search Engine", "google"),
        ],
    );

Form::new(&Signup::schema()).overrides(overrides).render()"#,
    };
    let action = FormAction::new(Signup::schema());
    Ok(Example::new("/examples/forms/labels-and-options", copy, action).render(labels_and_options_form))
}

fn children_form(
    schema: &SchemaDescriptor,
    result: Option<&SubmissionResult>,
    token: &str,
) -> Markup {
    Form::new(schema)
        .result(result)
        .instance(token)
        .render_with(|parts| {
            html! {
                (parts.field("firstName"))
                (parts.field_with("email", |field| field.template.label = "E-mail".to_string()))
                em { "You'll hear from us at this address 👆🏽" }
                (parts.field_with("howYouFoundOutAboutUs", |field| {
                    field.template.options = vec![
                        EnumOption::new("Friend", "fromAFriend"),
                        EnumOption::new("Search", "google"),
                    ];
                }))
                (parts.errors())
                (parts.button())
            }
        })
}

pub fn form_with_children() -> anyhow::Result<Example> {
    let copy = ExampleCopy {
        title: "Form with children",
        description: "In this example, we pass a children function to gain control over the Form UI.",
        code: r#"Form::new(&Signup::schema()).render_with(|parts| html! {
    (parts.field("firstName"))
    (parts.field_with("email", |field| field.template.label = "E-mail".to_string()))
    em { "You'll hear from us at this address 👆🏽" }
    (parts.field_with("howYouFoundOutAboutUs", |field| {
        field.template.options = vec![
            EnumOption::new("Friend", "fromAFriend"),
            EnumOption::new("Search", "google"),
        ];
    }))
    (parts.errors())
    (parts.button())
})"#,
    };
    let action = FormAction::new(Signup::schema());
    Ok(Example::new("/examples/forms/form-with-children", copy, action).render(children_form))
}
