//! Whole documents through the converter

use crate::common::{convert, FailingResolver};
use insta::assert_snapshot;
use texcards_engine::{convert_document, Converter, RenderedCard};

#[test]
fn test_single_definition() {
    let cards = convert("\\section{S}\n\\begin{cstdef}{1}Def text\\end{cstdef}Back text");
    assert_eq!(
        cards,
        vec![RenderedCard {
            name: "1. S".to_string(),
            front: r#"<span class="tex-cst tex-cst-def">Definition 1.</span>Def text"#.to_string(),
            back: "Back text".to_string(),
        }]
    );
}

#[test]
fn test_subsection_names_join_with_parent() {
    let doc = "\\section{A}\nintro\n\\subsection{B}\n\\begin{cstrmk*}note\\end{cstrmk*}why";
    let cards = convert(doc);
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name, "1. A::1. B");
    assert_snapshot!(cards[0].front.as_str(), @r#"<span class="tex-cst tex-cst-rmk">Remark.</span>note"#);
}

#[test]
fn test_consecutive_theorems() {
    let doc = "\\section{Groups}\n\
               \\begin{cstthm}{1}Lagrange\\end{cstthm}\nOrder divides.\n\
               \\begin{cstthm}{2}Cauchy\\end{cstthm}\nElement of order p.\n";
    let cards = convert(doc);
    assert_eq!(cards.len(), 2);
    assert!(cards[0].front.starts_with(r#"<span class="tex-cst tex-cst-thm">Theorem 1.</span>"#));
    assert!(cards[1].front.starts_with(r#"<span class="tex-cst tex-cst-thm">Theorem 2.</span>"#));
    assert_eq!(cards[0].back, "Order divides.");
    assert_eq!(cards[1].back, "Element of order p.");
}

#[test]
fn test_cards_follow_document_order_across_scopes() {
    let doc = "\\begin{cstqsn}{0}top\\end{cstqsn}\n\
               \\section{A}\n\\begin{cstqsn}{1}a\\end{cstqsn}\n\
               \\subsection{A1}\n\\begin{cstqsn}{2}a1\\end{cstqsn}\n\
               \\section{B}\n\\begin{cstqsn}{3}b\\end{cstqsn}\n";
    let names: Vec<String> = convert(doc).into_iter().map(|card| card.name).collect();
    assert_eq!(names, vec!["", "1. A", "1. A::1. A1", "2. B"]);
}

#[test]
fn test_text_without_blocks_yields_no_cards() {
    assert!(convert("\\section{Notes}\nJust prose, no cards.\n").is_empty());
    assert!(convert("").is_empty());
}

#[test]
fn test_unknown_tag_still_becomes_a_card() {
    let cards = convert("\\begin{cstlemma}{4}body\\end{cstlemma}back");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].front, "body");
    assert_eq!(cards[0].back, "back");
}

#[test]
fn test_failing_resolver_does_not_stop_conversion() {
    let doc = "\\section{S}\n\\begin{cstexe}{1}Draw it\\end{cstexe}\\includegraphics{missing.png}";
    let mut resolver = FailingResolver::default();
    let cards = convert_document(doc, &mut resolver);

    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].back, "");
    assert_eq!(resolver.requests, vec!["missing.png"]);
}

#[test]
fn test_preamble_images_are_resolved_but_not_carded() {
    let doc = "\\cimg{cover.png}\nIntro text.\n\\begin{cstdef}{1}x\\end{cstdef}y";
    let mut resolver = FailingResolver::default();
    let cards = convert_document(doc, &mut resolver);

    assert_eq!(cards.len(), 1);
    assert_eq!(resolver.requests, vec!["cover.png"]);
}

#[test]
fn test_base_deck_prefixes_every_name() {
    let doc = "\\begin{cstdef}{1}top\\end{cstdef}\n\\section{A}\n\\begin{cstdef}{2}x\\end{cstdef}";
    let cards = Converter::new()
        .with_base_deck("Algebra")
        .convert_to_vec(doc, &mut texcards_engine::media::IdentityResolver);
    let names: Vec<&str> = cards.iter().map(|card| card.name.as_str()).collect();
    assert_eq!(names, vec!["Algebra", "Algebra::1. A"]);
}

#[test]
fn test_realistic_card() {
    let doc = r"\section{Linear algebra}
\subsection{Eigenvalues}
\begin{cstdef}{3}
An \emph{eigenvalue} of $A$ is a $\lambda$ with
\begin{equation}
A v = \lambda v
\end{equation}
for some $v \neq 0$.
\end{cstdef}
Rank-nullity gives:
\begin{itemize}
  \item $\dim\ker(A - \lambda I) > 0$
  \item \textbf{not} the trace
\end{itemize}

See \cimg{eigen.png}.
";
    let cards = convert(doc);
    assert_eq!(cards.len(), 1);
    let card = &cards[0];

    assert_eq!(card.name, "1. Linear algebra::1. Eigenvalues");
    assert_eq!(
        card.front,
        "<span class=\"tex-cst tex-cst-def\">Definition 3.</span>\
         An <span class=\"tex-italic\">eigenvalue</span> of <anki-mathjax>A</anki-mathjax> \
         is a <anki-mathjax>\\lambda</anki-mathjax> with \
         <anki-mathjax block=\"true\">\nA v = \\lambda v\n</anki-mathjax> \
         for some <anki-mathjax>v \\neq 0</anki-mathjax>."
    );
    assert_eq!(
        card.back,
        "Rank-nullity gives: \
         <ul class=\"tex-itemize\"><li style=\"display:none;\"> </li>\
         <li><anki-mathjax>\\dim\\ker(A - \\lambda I) &gt; 0</anki-mathjax> </li>\
         <li><span class=\"tex-bold\">not</span> the trace </li></ul>\
         <br>See <img src=\"eigen.png\" />."
    );
}
