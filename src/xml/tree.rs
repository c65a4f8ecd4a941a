/// A node in an element's child list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data, unescaped.
    Text(String),
    CData(String),
    Comment(String),
    /// Processing instruction content between `<?` and `?>`.
    ProcessingInstruction(String),
    /// Raw doctype content; only appears in the prolog.
    DocType(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    fn is_whitespace(&self) -> bool {
        matches!(self, Node::Text(t) if t.chars().all(char::is_whitespace))
    }
}

/// An XML element with its attributes and ordered children.
///
/// Lookups match on the local name, so `inv:issuer` and `issuer` are both
/// found by `"issuer"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified name as written in the source, including any prefix.
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Index path from the root element to a descendant, counting every child
/// node (text included).
pub type NodePath = Vec<usize>;

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut e = Self::new(name);
        e.children.push(Node::Text(text.into()));
        e
    }

    /// Name without namespace prefix.
    pub fn local_name(&self) -> &str {
        self.name
            .rsplit_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Qualify `local` with this element's prefix.
    pub fn qualify(&self, local: &str) -> String {
        match self.prefix() {
            Some(prefix) => format!("{prefix}:{local}"),
            None => local.to_string(),
        }
    }

    /// A new, detached element named `local` in this element's namespace prefix.
    pub fn new_child(&self, local: &str) -> Element {
        Element::new(self.qualify(local))
    }

    pub fn is(&self, local: &str) -> bool {
        self.local_name() == local
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// First direct child element named `local`.
    pub fn find(&self, local: &str) -> Option<&Element> {
        self.elements().find(|e| e.is(local))
    }

    pub fn find_mut(&mut self, local: &str) -> Option<&mut Element> {
        self.children
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .find(|e| e.is(local))
    }

    pub fn find_all<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |e| e.is(local))
    }

    /// Child-list index of the first direct child element named `local`.
    pub fn position(&self, local: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|n| n.as_element().is_some_and(|e| e.is(local)))
    }

    /// Concatenated text and CDATA of the direct children, `None` if there is none.
    pub fn text(&self) -> Option<String> {
        let mut text: Option<String> = None;
        for node in &self.children {
            if let Node::Text(t) | Node::CData(t) = node {
                text.get_or_insert_with(String::new).push_str(t);
            }
        }
        text
    }

    /// Text of the first direct child element named `local`.
    pub fn child_text(&self, local: &str) -> Option<String> {
        self.find(local).and_then(Element::text)
    }

    /// Replace all direct text and CDATA with `text`.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children
            .retain(|n| !matches!(n, Node::Text(_) | Node::CData(_)));
        self.children.insert(0, Node::Text(text.into()));
    }

    /// Insert `child` right after the child node at `index`, repeating the
    /// indentation that precedes that node. Returns the index of `child`.
    pub fn insert_after(&mut self, index: usize, child: Element) -> usize {
        let indent = index
            .checked_sub(1)
            .and_then(|i| self.children.get(i))
            .filter(|n| n.is_whitespace())
            .cloned();

        let mut at = index + 1;
        if let Some(indent) = indent {
            self.children.insert(at, indent);
            at += 1;
        }
        self.children.insert(at, Node::Element(child));
        at
    }

    /// Append `child` after the last child element, keeping its indentation.
    pub fn append(&mut self, child: Element) -> usize {
        match self
            .children
            .iter()
            .rposition(|n| matches!(n, Node::Element(_)))
        {
            Some(last) => self.insert_after(last, child),
            None => {
                self.children.push(Node::Element(child));
                self.children.len() - 1
            }
        }
    }

    /// Paths to every descendant element named `local`, in document order.
    /// The element itself is never included.
    pub fn descendant_paths(&self, local: &str) -> Vec<NodePath> {
        let mut found = Vec::new();
        let mut path = Vec::new();
        collect_paths(self, local, &mut path, &mut found);
        found
    }

    /// Resolve a path produced by [`Element::descendant_paths`].
    pub fn get(&self, path: &[usize]) -> Option<&Element> {
        path.iter()
            .try_fold(self, |e, &i| e.children.get(i).and_then(Node::as_element))
    }

    pub fn get_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        path.iter().try_fold(self, |e, &i| {
            e.children.get_mut(i).and_then(Node::as_element_mut)
        })
    }
}

fn collect_paths(el: &Element, local: &str, path: &mut NodePath, found: &mut Vec<NodePath>) {
    for (i, node) in el.children.iter().enumerate() {
        if let Node::Element(child) = node {
            path.push(i);
            if child.is(local) {
                found.push(path.clone());
            }
            collect_paths(child, local, path, found);
            path.pop();
        }
    }
}

/// A parsed XML document.
///
/// The XML declaration is not kept; it is regenerated on write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Comments, processing instructions and doctype before the root.
    pub prolog: Vec<Node>,
    pub root: Element,
    /// Comments and processing instructions after the root.
    pub epilog: Vec<Node>,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
        }
    }
}
