//! Renderable units handed to the client router
//!
//! A [`Component`] is a named render function. An [`Element`] is a small tree of
//! components, deferred units and suspension boundaries. The router never renders
//! anything itself; [`Element::render`] exists so hosts and tests can resolve a tree.

use crate::deferred::Deferred;
use crate::error::LoadError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Asynchronous producer of a module, called at most once per deferred unit
pub type Loader = Arc<dyn Fn() -> BoxFuture<'static, Result<Module, LoadError>> + Send + Sync>;

type RenderFn = dyn Fn(&str) -> String + Send + Sync;

/// A named renderable
///
/// Cloning is cheap and keeps identity: two clones are [`Component::ptr_eq`].
#[derive(Clone)]
pub struct Component {
    inner: Arc<ComponentInner>,
}

struct ComponentInner {
    name: String,
    render: Box<RenderFn>,
}

impl Component {
    /// Create a component from a render function receiving its children's markup
    pub fn new<F>(name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(ComponentInner {
                name: name.into(),
                render: Box::new(render),
            }),
        }
    }

    /// Create a component rendering `<name>{children}</name>`
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let tag = name.clone();
        Self::new(name, move |children| format!("<{tag}>{children}</{tag}>"))
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn render(&self, children: &str) -> String {
        (self.inner.render)(children)
    }

    /// Whether both handles point at the same component
    pub fn ptr_eq(a: &Component, b: &Component) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Component").field(&self.inner.name).finish()
    }
}

/// A resolved route file; only the default export is used
#[derive(Debug, Clone)]
pub struct Module {
    pub default: Component,
}

impl From<Component> for Module {
    fn from(default: Component) -> Self {
        Self { default }
    }
}

/// Wrap an async closure as a [`Loader`]
///
/// # Examples
///
/// ```
/// use nexroute::element::{loader, Component, Module};
///
/// let page = loader(|| async { Ok(Module::from(Component::named("BlogPage"))) });
/// ```
pub fn loader<F, Fut>(f: F) -> Loader
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Module, LoadError>> + Send + 'static,
{
    Arc::new(move || Box::pin(f()))
}

/// A loader that resolves immediately to `component`
pub fn ready(component: Component) -> Loader {
    loader(move || {
        let module = Module::from(component.clone());
        async move { Ok(module) }
    })
}

/// Renderable tree consumed by the client router
#[derive(Debug, Clone)]
pub enum Element {
    /// Minimal empty fallback shown while a deferred unit is pending
    Placeholder,
    /// A component instance hosting nested elements
    Component {
        component: Component,
        children: Vec<Element>,
    },
    /// A deferred unit, resolved by the host when rendered
    Lazy(Deferred),
    /// Suspension boundary around pending content
    Suspense {
        fallback: Option<Box<Element>>,
        content: Box<Element>,
    },
}

impl Element {
    /// A component instance with no children
    pub fn component(component: Component) -> Self {
        Element::Component {
            component,
            children: Vec::new(),
        }
    }

    /// `component` hosting `child`, the usual shape of a middleware transform
    pub fn wrap(component: Component, child: Element) -> Self {
        Element::Component {
            component,
            children: vec![child],
        }
    }

    pub fn suspense(fallback: Option<Element>, content: Element) -> Self {
        Element::Suspense {
            fallback: fallback.map(Box::new),
            content: Box::new(content),
        }
    }

    /// First deferred unit found depth-first, looking through wrappers
    pub fn deferred(&self) -> Option<&Deferred> {
        match self {
            Element::Placeholder => None,
            Element::Lazy(unit) => Some(unit),
            Element::Suspense { content, .. } => content.deferred(),
            Element::Component { children, .. } => children.iter().find_map(Element::deferred),
        }
    }

    /// Outermost component, if the element is a component instance
    pub fn as_component(&self) -> Option<&Component> {
        match self {
            Element::Component { component, .. } => Some(component),
            _ => None,
        }
    }

    /// Resolve every deferred unit and render the markup
    ///
    /// A failing loader aborts the render; recovery is up to the host.
    pub fn render(&self) -> BoxFuture<'_, Result<String, LoadError>> {
        Box::pin(async move {
            match self {
                Element::Placeholder => Ok("<div></div>".to_string()),
                Element::Lazy(unit) => Ok(unit.load().await?.render("")),
                Element::Suspense { content, .. } => content.render().await,
                Element::Component {
                    component,
                    children,
                } => {
                    let mut markup = String::new();
                    for child in children {
                        markup.push_str(&child.render().await?);
                    }
                    Ok(component.render(&markup))
                }
            }
        })
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Placeholder => f.write_str("<Placeholder/>"),
            Element::Lazy(unit) => write!(f, "<Lazy key=\"{}\"/>", unit.key()),
            Element::Suspense { fallback, content } => {
                f.write_str("<Suspense fallback={")?;
                match fallback {
                    Some(fallback) => write!(f, "{fallback}")?,
                    None => f.write_str("null")?,
                }
                write!(f, "}}>{content}</Suspense>")
            }
            Element::Component {
                component,
                children,
            } => {
                if children.is_empty() {
                    return write!(f, "<{}/>", component.name());
                }
                write!(f, "<{}>", component.name())?;
                for child in children {
                    write!(f, "{child}")?;
                }
                write!(f, "</{}>", component.name())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_identity() {
        let a = Component::named("Shell");
        let b = a.clone();
        let c = Component::named("Shell");
        assert!(Component::ptr_eq(&a, &b));
        assert!(!Component::ptr_eq(&a, &c));
    }

    #[test]
    fn test_display() {
        let unit = Deferred::new("page:blog", ready(Component::named("Blog")));
        let element = Element::wrap(
            Component::named("Guard"),
            Element::suspense(Some(Element::Placeholder), Element::Lazy(unit)),
        );
        assert_eq!(
            element.to_string(),
            "<Guard><Suspense fallback={<Placeholder/>}><Lazy key=\"page:blog\"/></Suspense></Guard>"
        );

        let bare = Element::suspense(None, Element::component(Component::named("X")));
        assert_eq!(bare.to_string(), "<Suspense fallback={null}><X/></Suspense>");
    }

    #[test]
    fn test_deferred_lookup_through_wrappers() {
        let unit = Deferred::new("page:a", ready(Component::named("A")));
        let element = Element::wrap(
            Component::named("Outer"),
            Element::suspense(None, Element::Lazy(unit.clone())),
        );
        assert!(Deferred::ptr_eq(element.deferred().unwrap(), &unit));
        assert!(Element::Placeholder.deferred().is_none());
        assert_eq!(element.as_component().unwrap().name(), "Outer");
    }

    #[tokio::test]
    async fn test_render_resolves_lazy_units() {
        let unit = Deferred::new("page:about", ready(Component::named("About")));
        let element = Element::wrap(
            Component::new("Frame", |children| format!("[{children}]")),
            Element::suspense(Some(Element::Placeholder), Element::Lazy(unit)),
        );
        assert_eq!(element.render().await.unwrap(), "[<About></About>]");
    }

    #[tokio::test]
    async fn test_render_propagates_load_failure() {
        let failing = loader(|| async { Err(LoadError::new("boom")) });
        let element = Element::Lazy(Deferred::new("page:x", failing));
        let err = element.render().await.unwrap_err();
        assert_eq!(err.key(), "page:x");
        assert_eq!(err.message(), "boom");
    }
}
