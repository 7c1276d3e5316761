//! Whole-document rendering over a hand-built tree, covering list grouping,
//! escaping, nesting, and graceful degradation of unrecognized content.

use notion2markup::{
    Annotations, Block, BlockCommon, BulletedListItemBlock, CodeBlock, FileInfo, HeadingBlock,
    MediaBlock, NumberedListItemBlock, ParagraphBlock, RichTextRun, TextContent, UnknownBlock,
};
use pretty_assertions::assert_eq;

fn text(s: &str) -> TextContent {
    TextContent {
        rich_text: vec![RichTextRun::plain(s)],
    }
}

fn paragraph(s: &str) -> Block {
    Block::Paragraph(ParagraphBlock {
        common: BlockCommon::default(),
        content: text(s),
    })
}

fn document() -> Vec<Block> {
    let mut nested_bullet = BulletedListItemBlock {
        common: BlockCommon::default(),
        content: text("top item"),
    };
    nested_bullet.common.has_children = true;
    nested_bullet.common.children = Some(vec![Block::BulletedListItem(BulletedListItemBlock {
        common: BlockCommon::default(),
        content: text("sub item"),
    })]);

    vec![
        Block::Heading1(HeadingBlock {
            common: BlockCommon::default(),
            content: text("Release notes"),
        }),
        // Emphasis markers in source text must not become formatting.
        paragraph("weights are a*b and c_d"),
        Block::BulletedListItem(nested_bullet),
        Block::BulletedListItem(BulletedListItemBlock {
            common: BlockCommon::default(),
            content: text("second item"),
        }),
        Block::NumberedListItem(NumberedListItemBlock {
            common: BlockCommon::default(),
            content: text("step one"),
        }),
        Block::NumberedListItem(NumberedListItemBlock {
            common: BlockCommon::default(),
            content: text("step two"),
        }),
        Block::Code(CodeBlock {
            common: BlockCommon::default(),
            language: "python".to_string(),
            content: text("print(1 < 2)"),
            caption: Vec::new(),
        }),
        Block::Image(MediaBlock {
            common: BlockCommon::default(),
            file: FileInfo::external("diagram.png", "https://example.com/diagram.png"),
            caption: vec![RichTextRun::plain("Architecture")],
        }),
        Block::Unknown(UnknownBlock {
            common: BlockCommon::default(),
            block_type: "ai_block".to_string(),
            text: "salvaged text".to_string(),
        }),
    ]
}

#[test]
fn renders_the_document_as_markdown() {
    let expected = "\
# Release notes

weights are a\\*b and c\\_d

- top item
  - sub item
- second item

1. step one
2. step two

```python
print(1 < 2)
```

![Architecture](https://example.com/diagram.png)

salvaged text
";
    assert_eq!(notion2markup::blocks_to_markdown(&document()), expected);
}

#[test]
fn renders_the_document_as_html() {
    let expected = "\
<h1>Release notes</h1>
<p>weights are a*b and c_d</p>
<ul>
<li>top item
<ul>
<li>sub item</li>
</ul></li>
<li>second item</li>
</ul>
<ol>
<li>step one</li>
<li>step two</li>
</ol>
<pre><code class=\"language-python\">print(1 &lt; 2)</code></pre>
<img src=\"https://example.com/diagram.png\" alt=\"Architecture\" />
<p>salvaged text</p>
";
    assert_eq!(notion2markup::blocks_to_html(&document()), expected);
}

#[test]
fn composed_annotations_render_per_target() {
    let run = RichTextRun {
        text: "critical".to_string(),
        annotations: Annotations {
            bold: true,
            italic: true,
            ..Annotations::default()
        },
        link: None,
    };
    let block = Block::Paragraph(ParagraphBlock {
        common: BlockCommon::default(),
        content: TextContent {
            rich_text: vec![run],
        },
    });

    assert_eq!(
        notion2markup::blocks_to_markdown(std::slice::from_ref(&block)),
        "***critical***\n"
    );
    assert_eq!(
        notion2markup::blocks_to_html(&[block]),
        "<p><em><strong>critical</strong></em></p>\n"
    );
}
