use crate::svg::selector::Selector;

/// Handle to a node inside an [`SvgDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Element {
    /// Qualified name as written in the source (`style`, `svg:style`).
    pub(crate) name: String,
    pub(crate) attributes: Vec<(String, String)>,
}

impl Element {
    pub(crate) fn local_name(&self) -> &str {
        self.name
            .rsplit_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NodeData {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
    /// Raw processing instruction content between `<?` and `?>`.
    Pi(String),
    /// Raw XML declaration content between `<?` and `?>`.
    Decl(String),
    DocType(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) data: NodeData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// Owned, mutable SVG document.
///
/// Nodes live in an arena; removed nodes stay allocated but are unreachable from the document
/// roots, so every query only sees attached nodes.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    pub(crate) nodes: Vec<Node>,
    /// Document-level nodes in order (declaration, comments, the root element).
    pub(crate) top: Vec<NodeId>,
    pub(crate) root: NodeId,
}

impl SvgDocument {
    /// The document element (normally `<svg>`).
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes.get(id.0)?.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(id.0)?.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub(crate) fn push_node(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// Attached nodes in document order (pre-order).
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: self.top.iter().rev().copied().collect(),
        }
    }

    /// Attached nodes below `id` in document order, excluding `id` itself.
    pub fn descendants_of(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: self.node(id).children.iter().rev().copied().collect(),
        }
    }

    /// Local name of an element node.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(Element::local_name)
    }

    /// First attached element with the given local name.
    pub fn find_first_by_name(&self, local_name: &str) -> Option<NodeId> {
        self.descendants()
            .find(|&id| self.name(id) == Some(local_name))
    }

    /// First attached element matching `selector`, in document order.
    pub fn query(&self, selector: &Selector) -> Option<NodeId> {
        self.descendants().find(|&id| {
            self.element(id)
                .is_some_and(|el| selector.matches(el.local_name(), &el.attributes))
        })
    }

    /// Attribute value of an element.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set (or add) an attribute, keeping the position of an existing one.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        match el.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => value.clone_into(v),
            None => el.attributes.push((name.to_owned(), value.to_owned())),
        }
    }

    /// Concatenated text of all text and CDATA descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let NodeData::Text(t) | NodeData::CData(t) = &self.node(id).data {
            out.push_str(t);
        }
        for child in self.descendants_of(id) {
            if let NodeData::Text(t) | NodeData::CData(t) = &self.node(child).data {
                out.push_str(t);
            }
        }
        out
    }

    /// Replace every child of `id` with a single text node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if self.element(id).is_none() {
            return;
        }
        for child in std::mem::take(&mut self.nodes[id.0].children) {
            self.nodes[child.0].parent = None;
        }
        if !text.is_empty() {
            let t = self.push_node(NodeData::Text(text.to_owned()), Some(id));
            self.nodes[id.0].children.push(t);
        }
    }

    /// Set one declaration of the inline `style` attribute, preserving the others.
    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: &str) {
        let current = self.attribute(id, "style").unwrap_or_default();
        let mut decls: Vec<(String, String)> = current
            .split(';')
            .filter_map(|decl| {
                let (k, v) = decl.split_once(':')?;
                let k = k.trim();
                (!k.is_empty()).then(|| (k.to_owned(), v.trim().to_owned()))
            })
            .collect();

        match decls.iter_mut().find(|(k, _)| k == property) {
            Some((_, v)) => value.clone_into(v),
            None => decls.push((property.to_owned(), value.to_owned())),
        }

        let style = decls
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ");
        self.set_attribute(id, "style", &style);
    }

    /// Value of one declaration of the inline `style` attribute.
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        self.attribute(id, "style")?.split(';').find_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            (k.trim() == property).then(|| v.trim().to_owned())
        })
    }

    /// Create a detached element. Attach it with [`Self::prepend_child`].
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push_node(
            NodeData::Element(Element {
                name: name.to_owned(),
                attributes: Vec::new(),
            }),
            None,
        )
    }

    /// Insert `child` as the first child of `parent`, detaching it from any previous parent.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        self.remove(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(0, child);
    }

    /// Detach a node (and its subtree) from the document. Removing the root is ignored.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root {
            return;
        }
        match self.nodes[id.0].parent.take() {
            Some(parent) => self.nodes[parent.0].children.retain(|&c| c != id),
            None => self.top.retain(|&c| c != id),
        }
    }
}

/// Pre-order iterator over attached nodes. See [`SvgDocument::descendants`].
pub struct Descendants<'a> {
    doc: &'a SvgDocument,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.node(id).children.iter().rev().copied());
        Some(id)
    }
}
