//! Notes and boneyards spanning one or more lines.

use insta::assert_snapshot;
use screenplay_core::parse;

#[test]
fn test_notes_and_boneyards() {
    let text = "INT. LAB - NIGHT

The lights flicker. [[Should they flicker?]]

/* Cut scene:
DOCTOR
Hello.
*/
She leaves.[[Or stays
through the night

BOB
Hi.";
    let script = parse(text);

    assert_snapshot!(script.dump(), @r#"
    HEADING:"INT. LAB - NIGHT"
    ACTION:"The lights flicker. [[0]]

    /*0*/
    She leaves.[[1]]"
    CHARACTER:"BOB"
    DIALOGUE:"Hi."
    [[0]]NOTE:"Should they flicker?"
    [[1]]NOTE:"Or stays
    through the night"
    /*0*/BONEYARD:" Cut scene:
    DOCTOR
    Hello.
    "
    "#);

    assert_eq!(
        script.elements()[1].text(),
        "The lights flicker. \n\n\nShe leaves."
    );
}

#[test]
fn test_several_inline_notes_on_one_line() {
    let script = parse("A [[one]] B [[two]] C");
    assert_eq!(script.elements()[0].text_raw(), "A [[0]] B [[1]] C");
    assert_eq!(script.elements()[0].text(), "A  B  C");
    assert_eq!(script.notes().len(), 2);
    assert_eq!(script.notes()[1].text(), "two");
}

#[test]
fn test_boneyard_hides_dialogue() {
    let script = parse("\nBOB\n/*(angrily)*/Go away.");
    assert_eq!(script.boneyards()[0].text(), "(angrily)");
    assert_eq!(script.elements()[1].text(), "Go away.");
}

#[test]
fn test_expand_markers_restores_annotations() {
    let script = parse("Look [[a note]] here /*gone*/.");
    let raw = script.elements()[0].text_raw();
    assert_eq!(
        script.expand_markers(raw),
        "Look [[a note]] here /*gone*/."
    );
}
