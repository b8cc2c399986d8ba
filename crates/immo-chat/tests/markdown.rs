use immo_chat::markdown::render_markdown;
use ratatui::style::Modifier;
use ratatui::text::Line;

fn plain(lines: &[Line<'_>]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect()
}

#[test]
fn paragraphs_are_separated_by_one_blank_line() {
    let lines = render_markdown("Premier paragraphe.\n\nDeuxième paragraphe.\n\n");

    assert_eq!(
        plain(&lines),
        vec!["Premier paragraphe.", "", "Deuxième paragraphe."]
    );
}

#[test]
fn emphasis_is_styled() {
    let lines = render_markdown("Un **appartement** *lumineux*");
    let spans = &lines[0].spans;

    let bold = spans.iter().find(|s| s.content == "appartement").unwrap();
    assert!(bold.style.add_modifier.contains(Modifier::BOLD));

    let italic = spans.iter().find(|s| s.content == "lumineux").unwrap();
    assert!(italic.style.add_modifier.contains(Modifier::ITALIC));
}

#[test]
fn link_with_bare_url_text_is_shortened() {
    let lines = render_markdown("Voir <https://www.example.com/annonces/f3?page=2>");
    let text = plain(&lines).join("\n");

    assert_eq!(text, "Voir www.example.com/annonces/f3");
}

#[test]
fn link_with_own_text_keeps_its_label() {
    let lines = render_markdown("[le site](https://jachete.dz/contact)");
    let link = lines[0]
        .spans
        .iter()
        .find(|s| s.content == "le site")
        .unwrap();

    assert!(link.style.add_modifier.contains(Modifier::UNDERLINED));
    assert!(!plain(&lines)[0].contains("jachete.dz"));
}

#[test]
fn bare_url_in_text_is_shown_as_short_link() {
    let lines = render_markdown("Consultez https://www.jachete.dz/annonces/ pour plus.");

    assert_eq!(plain(&lines), vec!["Consultez www.jachete.dz/annonces pour plus."]);
    let link = lines[0]
        .spans
        .iter()
        .find(|s| s.content == "www.jachete.dz/annonces")
        .unwrap();
    assert!(link.style.add_modifier.contains(Modifier::UNDERLINED));
}

#[test]
fn bare_url_in_code_is_left_alone() {
    let lines = plain(&render_markdown("`https://a.dz/x/`\n\n```\nhttps://a.dz/y/\n```\n"));

    assert_eq!(lines, vec!["https://a.dz/x/", "", "    https://a.dz/y/"]);
}

#[test]
fn tables_are_aligned() {
    let md = "| Ville | Prix |\n|---|---|\n| Oran | 12 M |\n| Tizi Ouzou | 9 M |\n";
    let lines = plain(&render_markdown(md));

    assert_eq!(
        lines,
        vec![
            "Ville      │ Prix",
            "───────────┼─────",
            "Oran       │ 12 M",
            "Tizi Ouzou │ 9 M ",
        ]
    );
}

#[test]
fn lists_get_markers() {
    let lines = plain(&render_markdown("- Alger\n- Oran\n\n1. visite\n2. offre\n"));

    assert_eq!(lines, vec!["• Alger", "• Oran", "", "1. visite", "2. offre"]);
}

#[test]
fn headings_and_code_blocks() {
    let lines = plain(&render_markdown("# Budget\n\n```\ntotal = 10\n```\n"));

    assert_eq!(lines, vec!["Budget", "", "    total = 10"]);
}

#[test]
fn empty_content_renders_nothing() {
    assert!(render_markdown("").is_empty());
    assert!(render_markdown("\n\n").is_empty());
}
