// In-place mutation semantics: visibility, validation, plural slots.

#[path = "support/common.rs"]
mod common;

use anyhow::Result;
use pocat::{Catalog, CatalogError, MAX_PLURAL_FORMS};

use common::{find_message, sample_catalog};

#[test]
fn set_msgstr_is_visible_in_a_fresh_pass() -> Result<()> {
    let catalog = sample_catalog()?;
    let message = find_message(&catalog, "Untranslated").expect("entry present");
    message.set_msgstr("Jetzt übersetzt")?;

    let again = find_message(&catalog, "Untranslated").expect("entry still present");
    assert_eq!(again.msgstr(), "Jetzt übersetzt");
    Ok(())
}

#[test]
fn mutation_is_visible_through_a_sibling_handle() -> Result<()> {
    let catalog = sample_catalog()?;
    let first = find_message(&catalog, "Hello, world!").expect("entry present");
    let second = find_message(&catalog, "Hello, world!").expect("entry present");

    first.set_msgstr("Servus, Welt!")?;
    assert_eq!(second.msgstr(), "Servus, Welt!");
    Ok(())
}

#[test]
fn mutations_persist_through_write_and_reread() -> Result<()> {
    let catalog = sample_catalog()?;
    let message = find_message(&catalog, "Untranslated").expect("entry present");
    message.set_msgstr("gespeichert")?;
    message.set_comments("edited by test");

    let mut reread = Catalog::new();
    reread.read_str(&catalog.render())?;
    let reloaded = find_message(&reread, "Untranslated").expect("entry present");
    assert_eq!(reloaded.msgstr(), "gespeichert");
    assert_eq!(reloaded.comments(), "edited by test");
    Ok(())
}

#[test]
fn plural_lookup_out_of_range_is_absent_not_an_error() -> Result<()> {
    let catalog = sample_catalog()?;

    let plural = find_message(&catalog, "One file").expect("plural entry");
    assert_eq!(plural.msgstr_plural(0).as_deref(), Some("Eine Datei"));
    assert_eq!(plural.msgstr_plural(5), None);

    let singular = find_message(&catalog, "Hello, world!").expect("singular entry");
    assert_eq!(singular.msgstr_plural(0), None);
    Ok(())
}

#[test]
fn clearing_a_plural_slot_leaves_the_others() -> Result<()> {
    let catalog = sample_catalog()?;
    let plural = find_message(&catalog, "One file").expect("plural entry");

    plural.set_msgstr_plural(1, None)?;
    assert_eq!(plural.msgstr_plural(1), None);
    assert_eq!(plural.msgstr_plural(0).as_deref(), Some("Eine Datei"));

    // Clearing a slot that was never set is a no-op, not an error.
    plural.set_msgstr_plural(6, None)?;
    Ok(())
}

#[test]
fn setting_a_high_slot_grows_the_vector() -> Result<()> {
    let catalog = sample_catalog()?;
    let plural = find_message(&catalog, "One file").expect("plural entry");

    plural.set_msgstr_plural(3, Some("vier Dateien"))?;
    assert_eq!(plural.msgstr_plural(3).as_deref(), Some("vier Dateien"));
    assert_eq!(plural.msgstr_plural(2), None, "intermediate slots stay absent");

    let err = plural
        .set_msgstr_plural(MAX_PLURAL_FORMS, Some("zu viele"))
        .expect_err("index beyond the bound must fail");
    assert!(matches!(err, CatalogError::InvalidArgument(_)), "got: {err}");
    Ok(())
}

#[test]
fn msgid_collision_is_rejected_and_value_unchanged() -> Result<()> {
    let catalog = sample_catalog()?;
    let message = find_message(&catalog, "Untranslated").expect("entry present");

    let err = message
        .set_msgid("Hello, world!")
        .expect_err("colliding msgid must fail");
    assert!(matches!(err, CatalogError::DuplicateKey { .. }), "got: {err}");
    assert_eq!(message.msgid(), "Untranslated");
    Ok(())
}

#[test]
fn empty_msgid_is_rejected() -> Result<()> {
    let catalog = sample_catalog()?;
    let message = find_message(&catalog, "Untranslated").expect("entry present");
    let err = message.set_msgid("").expect_err("empty msgid must fail");
    assert!(matches!(err, CatalogError::InvalidArgument(_)), "got: {err}");
    Ok(())
}

#[test]
fn singular_and_plural_setters_do_not_cross() -> Result<()> {
    let catalog = sample_catalog()?;

    let plural = find_message(&catalog, "One file").expect("plural entry");
    let err = plural.set_msgstr("flat").expect_err("plural rejects msgstr");
    assert!(matches!(err, CatalogError::InvalidArgument(_)), "got: {err}");

    let singular = find_message(&catalog, "Hello, world!").expect("singular entry");
    let err = singular
        .set_msgstr_plural(0, Some("indexed"))
        .expect_err("singular rejects msgstr_plural");
    assert!(matches!(err, CatalogError::InvalidArgument(_)), "got: {err}");
    Ok(())
}

#[test]
fn msgctxt_can_be_set_and_cleared() -> Result<()> {
    let catalog = sample_catalog()?;
    let message = find_message(&catalog, "Untranslated").expect("entry present");

    message.set_msgctxt(Some("sidebar"))?;
    assert_eq!(message.msgctxt().as_deref(), Some("sidebar"));

    message.set_msgctxt(None)?;
    assert_eq!(message.msgctxt(), None);
    Ok(())
}

#[test]
fn msgctxt_change_that_collides_is_rejected() -> Result<()> {
    let mut catalog = Catalog::new();
    catalog.read_str(concat!(
        "msgctxt \"menu\"\n",
        "msgid \"Open\"\n",
        "msgstr \"\"\n",
        "\n",
        "msgctxt \"toolbar\"\n",
        "msgid \"Open\"\n",
        "msgstr \"\"\n",
    ))?;

    let toolbar = catalog
        .messages()
        .find(|m| m.msgctxt().as_deref() == Some("toolbar"))
        .expect("toolbar entry");
    let err = toolbar
        .set_msgctxt(Some("menu"))
        .expect_err("colliding msgctxt must fail");
    assert!(matches!(err, CatalogError::DuplicateKey { .. }), "got: {err}");
    assert_eq!(toolbar.msgctxt().as_deref(), Some("toolbar"));
    Ok(())
}

#[test]
fn promoting_a_singular_message_to_plural() -> Result<()> {
    let catalog = sample_catalog()?;
    let message = find_message(&catalog, "Untranslated").expect("entry present");

    message.set_msgid_plural("Untranslated things")?;
    assert!(message.is_plural());
    message.set_msgstr_plural(0, Some("eins"))?;
    message.set_msgstr_plural(1, Some("viele"))?;
    assert_eq!(message.msgstr_plural(1).as_deref(), Some("viele"));
    Ok(())
}
