//! Host primitive tree
//!
//! Components resolve nodes into [`HostElement`]s: a small vocabulary of
//! visual primitives with attributes, text, children and event listeners.
//! Backends turn the tree into HTML ([`html`]) or terminal lines
//! ([`terminal`]). Interactions are simulated with [`HostOutput::trigger`],
//! which fires the target's listeners and bubbles to its ancestors.

pub mod html;
pub mod terminal;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

/// Visual primitive vocabulary of the host environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Block,
    Row,
    Column,
    Grid,
    Card,
    Divider,
    Text,
    Strong,
    Code,
    Heading(u8),
    Paragraph,
    Badge,
    Link,
    Image,
    Button,
    Input,
    TextArea,
    Select,
    SelectOption,
    Checkbox,
    Form,
    Label,
    Table,
    TableRow,
    TableHeader,
    TableCell,
    List,
    ListItem,
    Progress,
    Alert,
    Modal,
    Nav,
    Header,
    Main,
    Aside,
    Placeholder,
}

impl Primitive {
    /// HTML tag used by the HTML backend
    pub fn tag(&self) -> &'static str {
        match self {
            Primitive::Block | Primitive::Grid | Primitive::Card => "div",
            Primitive::Row | Primitive::Column => "div",
            Primitive::Divider => "hr",
            Primitive::Text | Primitive::Badge | Primitive::Placeholder => "span",
            Primitive::Strong => "strong",
            Primitive::Code => "code",
            Primitive::Heading(1) => "h1",
            Primitive::Heading(2) => "h2",
            Primitive::Heading(3) => "h3",
            Primitive::Heading(4) => "h4",
            Primitive::Heading(5) => "h5",
            Primitive::Heading(_) => "h6",
            Primitive::Paragraph => "p",
            Primitive::Link => "a",
            Primitive::Image => "img",
            Primitive::Button => "button",
            Primitive::Input | Primitive::Checkbox => "input",
            Primitive::TextArea => "textarea",
            Primitive::Select => "select",
            Primitive::SelectOption => "option",
            Primitive::Form => "form",
            Primitive::Label => "label",
            Primitive::Table => "table",
            Primitive::TableRow => "tr",
            Primitive::TableHeader => "th",
            Primitive::TableCell => "td",
            Primitive::List => "ul",
            Primitive::ListItem => "li",
            Primitive::Progress => "progress",
            Primitive::Alert => "div",
            Primitive::Modal => "dialog",
            Primitive::Nav => "nav",
            Primitive::Header => "header",
            Primitive::Main => "main",
            Primitive::Aside => "aside",
        }
    }

    /// Elements with no closing tag
    pub fn is_void(&self) -> bool {
        matches!(
            self,
            Primitive::Divider | Primitive::Image | Primitive::Input | Primitive::Checkbox
        )
    }

    /// Primitives a user can focus and activate
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            Primitive::Button
                | Primitive::Link
                | Primitive::Input
                | Primitive::TextArea
                | Primitive::Select
                | Primitive::Checkbox
        )
    }

    /// Base class the backends attach for styling hooks
    pub fn class(&self) -> Option<&'static str> {
        match self {
            Primitive::Row => Some("q-row"),
            Primitive::Column => Some("q-column"),
            Primitive::Grid => Some("q-grid"),
            Primitive::Card => Some("q-card"),
            Primitive::Badge => Some("q-badge"),
            Primitive::Alert => Some("q-alert"),
            Primitive::Placeholder => Some("q-placeholder"),
            _ => None,
        }
    }
}

/// Interaction kinds a listener can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    Click,
    Change,
    Submit,
    Close,
}

impl HostEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostEvent::Click => "click",
            HostEvent::Change => "change",
            HostEvent::Submit => "submit",
            HostEvent::Close => "close",
        }
    }
}

impl fmt::Display for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Callback = Arc<dyn Fn(Option<&Value>) + Send + Sync>;

/// An event listener attached to a host element
#[derive(Clone)]
pub struct Listener {
    pub event: HostEvent,
    /// Name of the action this listener dispatches, if any (introspection only)
    pub action: Option<String>,
    /// When set, firing this listener stops the interaction from bubbling
    pub stop_propagation: bool,
    callback: Callback,
}

impl Listener {
    pub fn new<F>(event: HostEvent, callback: F) -> Self
    where
        F: Fn(Option<&Value>) + Send + Sync + 'static,
    {
        Self {
            event,
            action: None,
            stop_propagation: false,
            callback: Arc::new(callback),
        }
    }

    pub fn describing(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn stopping(mut self, stop: bool) -> Self {
        self.stop_propagation = stop;
        self
    }

    pub fn fire(&self, payload: Option<&Value>) {
        (self.callback)(payload)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("event", &self.event)
            .field("action", &self.action)
            .field("stop_propagation", &self.stop_propagation)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.event == other.event
            && self.action == other.action
            && self.stop_propagation == other.stop_propagation
    }
}

/// One host visual primitive
#[derive(Debug, Clone, PartialEq)]
pub struct HostElement {
    pub primitive: Primitive,
    pub id: Option<String>,
    pub class_name: Option<String>,
    pub style: Option<Map<String, Value>>,
    pub attrs: BTreeMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<HostElement>,
    pub listeners: Vec<Listener>,
}

impl HostElement {
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            id: None,
            class_name: None,
            style: None,
            attrs: BTreeMap::new(),
            text: None,
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn text(primitive: Primitive, text: impl Into<String>) -> Self {
        Self::new(primitive).with_text(text)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_id_opt(mut self, id: Option<&str>) -> Self {
        if let Some(id) = id {
            self.id = Some(id.to_string());
        }
        self
    }

    /// Append a class, keeping any already present
    pub fn with_class(mut self, class: impl AsRef<str>) -> Self {
        let class = class.as_ref();
        if class.is_empty() {
            return self;
        }
        self.class_name = Some(match self.class_name.take() {
            Some(existing) => format!("{} {}", existing, class),
            None => class.to_string(),
        });
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: HostElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = HostElement>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_listener(mut self, listener: Listener) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn listens_to(&self, event: HostEvent) -> bool {
        self.listeners.iter().any(|l| l.event == event)
    }

    /// Text of this element and all descendants, space separated
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    /// Structural JSON dump: primitive, hints, text, listeners and children
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("primitive".to_string(), Value::String(format!("{:?}", self.primitive)));
        if let Some(id) = &self.id {
            obj.insert("id".to_string(), Value::String(id.clone()));
        }
        if let Some(class) = &self.class_name {
            obj.insert("className".to_string(), Value::String(class.clone()));
        }
        if let Some(style) = &self.style {
            obj.insert("style".to_string(), Value::Object(style.clone()));
        }
        if !self.attrs.is_empty() {
            let attrs = self
                .attrs
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            obj.insert("attrs".to_string(), Value::Object(attrs));
        }
        if let Some(text) = &self.text {
            obj.insert("text".to_string(), Value::String(text.clone()));
        }
        if !self.listeners.is_empty() {
            let listeners = self
                .listeners
                .iter()
                .map(|l| {
                    let mut entry = Map::new();
                    entry.insert("event".to_string(), Value::String(l.event.to_string()));
                    if let Some(action) = &l.action {
                        entry.insert("action".to_string(), Value::String(action.clone()));
                    }
                    if l.stop_propagation {
                        entry.insert("stopPropagation".to_string(), Value::Bool(true));
                    }
                    Value::Object(entry)
                })
                .collect();
            obj.insert("listeners".to_string(), Value::Array(listeners));
        }
        if !self.children.is_empty() {
            let children = self.children.iter().map(HostElement::to_value).collect();
            obj.insert("children".to_string(), Value::Array(children));
        }
        Value::Object(obj)
    }

    fn collect_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        if let Some(text) = self.text.as_deref() {
            if !text.is_empty() {
                parts.push(text);
            }
        }
        for child in &self.children {
            child.collect_text(parts);
        }
    }
}

/// What happened when an interaction was triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerOutcome {
    /// Number of listeners fired (target plus bubbled ancestors)
    pub fired: usize,
    /// Whether a fired listener stopped propagation
    pub stopped: bool,
}

/// Ordered list of root host elements produced by a render pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostOutput {
    elements: Vec<HostElement>,
}

impl HostOutput {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(element: HostElement) -> Self {
        Self {
            elements: vec![element],
        }
    }

    pub fn from_elements(elements: Vec<HostElement>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[HostElement] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<HostElement> {
        self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn push(&mut self, element: HostElement) {
        self.elements.push(element);
    }

    /// Append another output, preserving order
    pub fn extend(&mut self, other: HostOutput) {
        self.elements.extend(other.elements);
    }

    pub fn concat(outputs: impl IntoIterator<Item = HostOutput>) -> Self {
        let mut all = Self::empty();
        for output in outputs {
            all.extend(output);
        }
        all
    }

    /// Element at a path of child indices (`[root, child, grandchild, ...]`)
    pub fn at(&self, path: &[usize]) -> Option<&HostElement> {
        let (first, rest) = path.split_first()?;
        let mut current = self.elements.get(*first)?;
        for index in rest {
            current = current.children.get(*index)?;
        }
        Some(current)
    }

    /// Depth-first search; returns the path of the first match
    pub fn find_path<P>(&self, predicate: P) -> Option<Vec<usize>>
    where
        P: Fn(&HostElement) -> bool,
    {
        fn search<P: Fn(&HostElement) -> bool>(
            elements: &[HostElement],
            predicate: &P,
            path: &mut Vec<usize>,
        ) -> bool {
            for (i, element) in elements.iter().enumerate() {
                path.push(i);
                if predicate(element) || search(&element.children, predicate, path) {
                    return true;
                }
                path.pop();
            }
            false
        }

        let mut path = Vec::new();
        search(&self.elements, &predicate, &mut path).then_some(path)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&HostElement> {
        self.find_path(|e| e.id.as_deref() == Some(id))
            .and_then(|p| self.at(&p))
    }

    /// First interactive element whose own text equals `text`
    pub fn find_by_text(&self, text: &str) -> Option<&HostElement> {
        self.path_of_text(text).and_then(|p| self.at(&p))
    }

    pub fn path_of_text(&self, text: &str) -> Option<Vec<usize>> {
        self.find_path(|e| e.primitive.is_interactive() && e.text.as_deref() == Some(text))
    }

    /// Paths of all interactive elements, in document order
    pub fn interactive_paths(&self) -> Vec<Vec<usize>> {
        fn collect(elements: &[HostElement], path: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
            for (i, element) in elements.iter().enumerate() {
                path.push(i);
                if element.primitive.is_interactive() {
                    out.push(path.clone());
                }
                collect(&element.children, path, out);
                path.pop();
            }
        }

        let mut out = Vec::new();
        collect(&self.elements, &mut Vec::new(), &mut out);
        out
    }

    /// Simulate an interaction on the element at `path`
    ///
    /// Listeners for `event` fire on the target first, then on each
    /// ancestor outward, until a fired listener has `stop_propagation`.
    pub fn trigger(&self, path: &[usize], event: HostEvent, payload: Option<Value>) -> TriggerOutcome {
        let mut chain = Vec::with_capacity(path.len());
        for depth in 1..=path.len() {
            match self.at(&path[..depth]) {
                Some(element) => chain.push(element),
                None => {
                    tracing::debug!(?path, %event, "trigger target not found");
                    return TriggerOutcome::default();
                }
            }
        }

        let mut outcome = TriggerOutcome::default();
        for element in chain.iter().rev() {
            for listener in element.listeners.iter().filter(|l| l.event == event) {
                listener.fire(payload.as_ref());
                outcome.fired += 1;
                outcome.stopped |= listener.stop_propagation;
            }
            if outcome.stopped {
                break;
            }
        }
        outcome
    }

    /// Trigger by element id
    pub fn trigger_id(&self, id: &str, event: HostEvent, payload: Option<Value>) -> TriggerOutcome {
        match self.find_path(|e| e.id.as_deref() == Some(id)) {
            Some(path) => self.trigger(&path, event, payload),
            None => {
                tracing::debug!(id, %event, "no element with id");
                TriggerOutcome::default()
            }
        }
    }

    /// JSON array of [`HostElement::to_value`] dumps
    pub fn to_value(&self) -> Value {
        Value::Array(self.elements.iter().map(HostElement::to_value).collect())
    }

    /// Text content of every root, space separated
    pub fn text_content(&self) -> String {
        self.elements
            .iter()
            .map(HostElement::text_content)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<HostElement> for HostOutput {
    fn from(element: HostElement) -> Self {
        Self::single(element)
    }
}

impl IntoIterator for HostOutput {
    type Item = HostElement;
    type IntoIter = std::vec::IntoIter<HostElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl FromIterator<HostElement> for HostOutput {
    fn from_iter<I: IntoIterator<Item = HostElement>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}
