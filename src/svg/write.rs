use quick_xml::escape::{escape, partial_escape};

use crate::svg::tree::{NodeData, NodeId, SvgDocument};

impl SvgDocument {
    /// Serialize the attached document back to markup.
    ///
    /// Output is deterministic: identical trees always produce identical strings.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for &id in &self.top {
            self.write_node(id, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        match &node.data {
            NodeData::Element(el) => {
                out.push('<');
                out.push_str(&el.name);
                for (k, v) in &el.attributes {
                    out.push(' ');
                    out.push_str(k);
                    out.push_str("=\"");
                    out.push_str(&escape(v.as_str()));
                    out.push('"');
                }
                if node.children.is_empty() {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                for &child in &node.children {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(&el.name);
                out.push('>');
            }
            NodeData::Text(t) => out.push_str(&partial_escape(t.as_str())),
            NodeData::CData(t) => {
                out.push_str("<![CDATA[");
                out.push_str(t);
                out.push_str("]]>");
            }
            NodeData::Comment(t) => {
                out.push_str("<!--");
                out.push_str(t);
                out.push_str("-->");
            }
            NodeData::Pi(t) | NodeData::Decl(t) => {
                out.push_str("<?");
                out.push_str(t);
                out.push_str("?>");
            }
            NodeData::DocType(t) => {
                out.push_str("<!DOCTYPE ");
                out.push_str(t.trim_start());
                out.push('>');
            }
        }
    }
}
