//! Conversions that touch the filesystem through the resolvers

use std::fs;
use tempfile::TempDir;
use texcards_engine::media::{LinkResolver, MediaImporter};
use texcards_engine::Converter;

const DOC: &str = "\\section{Plots}\n\
                   \\begin{cstexe}{1}Sketch \\includegraphics[width=4cm]{figures/sine}\\end{cstexe}\
                   Compare with \\cimg{figures/sine.png} and \\cimg{missing.png}.";

fn document_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("figures")).unwrap();
    fs::write(dir.path().join("figures/sine.png"), b"\x89PNG sine").unwrap();
    dir
}

#[test]
fn test_importer_copies_each_image_once() {
    let docs = document_dir();
    let media = docs.path().join("collection.media");
    let mut importer = MediaImporter::new(docs.path(), &media);

    let cards = Converter::new().convert_to_vec(DOC, &mut importer);

    assert_eq!(cards.len(), 1);
    assert_eq!(
        cards[0].front,
        r#"<span class="tex-cst tex-cst-exe">Exercise 1.</span>Sketch <img src="sine.png" />"#
    );
    assert_eq!(cards[0].back, r#"Compare with <img src="sine.png" /> and ."#);

    let stored: Vec<_> = fs::read_dir(&media).unwrap().collect();
    assert_eq!(stored.len(), 1);
    assert_eq!(fs::read(media.join("sine.png")).unwrap(), b"\x89PNG sine");
}

#[test]
fn test_link_resolver_points_at_the_source() {
    let docs = document_dir();
    let mut resolver = LinkResolver::new(docs.path());

    let cards = Converter::new().convert_to_vec(DOC, &mut resolver);
    let expected = docs.path().join("figures/sine.png");

    assert!(cards[0]
        .front
        .contains(&format!("<img src=\"{}\" />", expected.display())));
}
