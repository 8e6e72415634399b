use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let hx_attribute = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        hx_attribute, endpoint,
        "want form with attribute {attribute}=\"{endpoint}\", got {hx_attribute:?}"
    );
}

#[track_caller]
fn must_get_input<'a>(form: &ElementRef<'a>, name: &str) -> ElementRef<'a> {
    form.select(&Selector::parse("input").unwrap())
        .find(|input| input.value().attr("name") == Some(name))
        .unwrap_or_else(|| panic!("No input found with name \"{name}\""))
}

#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str, required: bool) {
    let input = must_get_input(form, name);
    let input_type = input.value().attr("type").unwrap_or_default();

    assert_eq!(
        input_type, type_,
        "want input with type \"{type_}\", got {input_type:?}"
    );
    assert_eq!(
        input.value().attr("required").is_some(),
        required,
        "want input with name {name} to have required={required}"
    );
}

#[track_caller]
pub(crate) fn assert_form_input_with_value(
    form: &ElementRef<'_>,
    name: &str,
    type_: &str,
    value: &str,
) {
    let input = must_get_input(form, name);
    let input_type = input.value().attr("type").unwrap_or_default();
    let input_value = input.value().attr("value").unwrap_or_default();

    assert_eq!(
        input_type, type_,
        "want input with type \"{type_}\", got {input_type:?}"
    );
    assert_eq!(
        input_value, value,
        "want input with value \"{value}\", got {input_value:?}"
    );
}

/// Assert that the select named `name` has exactly one selected option and
/// that its value is `value`.
#[track_caller]
pub(crate) fn assert_selected_option(form: &ElementRef<'_>, name: &str, value: &str) {
    let select = form
        .select(&Selector::parse("select").unwrap())
        .find(|select| select.value().attr("name") == Some(name))
        .unwrap_or_else(|| panic!("No select found with name \"{name}\""));

    let selected_values = select
        .select(&Selector::parse("option[selected]").unwrap())
        .map(|option| option.value().attr("value").unwrap_or_default())
        .collect::<Vec<_>>();

    assert_eq!(
        selected_values,
        [value],
        "want select {name} to have option \"{value}\" selected"
    );
}

#[track_caller]
pub(crate) fn assert_form_submit_button_with_text(form: &ElementRef<'_>, text: &str) {
    let submit_button = form
        .select(&Selector::parse("button[type=submit]").unwrap())
        .next()
        .expect("No submit button found");

    let got_text = submit_button.text().collect::<Vec<_>>().join("");
    let got_text = got_text.trim();
    assert_eq!(text, got_text);
}
