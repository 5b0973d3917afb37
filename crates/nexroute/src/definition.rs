//! Route definitions consumed by the client router

use crate::element::Element;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// How a route is addressed within its parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    /// Renders at the parent's own path
    Index,
    /// Relative path: `"/"`, `"blog"`, `":id"`, `"*"`
    Path(String),
}

/// One route in the nested route list
#[derive(Debug, Clone)]
pub struct RouteDef {
    pub target: RouteTarget,
    pub element: Element,
    pub children: Option<Vec<RouteDef>>,
}

impl RouteDef {
    pub fn index(element: Element) -> Self {
        Self {
            target: RouteTarget::Index,
            element,
            children: None,
        }
    }

    pub fn at(path: impl Into<String>, element: Element) -> Self {
        Self {
            target: RouteTarget::Path(path.into()),
            element,
            children: None,
        }
    }

    /// Attach children, leaving `children` unset when there are none
    pub fn nest(mut self, children: Vec<RouteDef>) -> Self {
        self.children = (!children.is_empty()).then_some(children);
        self
    }

    pub fn path(&self) -> Option<&str> {
        match &self.target {
            RouteTarget::Path(path) => Some(path),
            RouteTarget::Index => None,
        }
    }

    pub fn is_index(&self) -> bool {
        self.target == RouteTarget::Index
    }

    /// Children, empty when unset
    pub fn children(&self) -> &[RouteDef] {
        self.children.as_deref().unwrap_or_default()
    }
}

impl Serialize for RouteDef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match &self.target {
            RouteTarget::Index => map.serialize_entry("index", &true)?,
            RouteTarget::Path(path) => map.serialize_entry("path", path)?,
        }
        map.serialize_entry("element", &self.element.to_string())?;
        if let Some(children) = &self.children {
            map.serialize_entry("children", children)?;
        }
        map.end()
    }
}
