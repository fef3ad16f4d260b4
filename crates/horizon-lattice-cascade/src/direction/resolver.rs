//! Direction resolution over an element tree.

use super::{first_strong_direction, DirectionalityPolicy, TextDirection};
use crate::element::{ChildNode, Element};

/// Resolves the text direction of elements under a [`DirectionalityPolicy`].
///
/// Resolution reads the tree and never caches, so repeated calls give the
/// same answer as long as the tree is unchanged.
#[derive(Debug, Clone, Default)]
pub struct DirectionResolver {
    policy: DirectionalityPolicy,
}

impl DirectionResolver {
    /// Create a resolver with the given policy.
    pub fn new(policy: DirectionalityPolicy) -> Self {
        Self { policy }
    }

    /// The policy in use.
    pub fn policy(&self) -> &DirectionalityPolicy {
        &self.policy
    }

    /// Resolve the direction of an element.
    pub fn resolve<E: Element>(&self, element: &E) -> TextDirection {
        let mut current = element.clone();
        loop {
            let dir = current.attribute(None, &self.policy.dir_attribute);
            if let Some(direction) = dir.and_then(TextDirection::from_keyword) {
                return direction;
            }

            let auto = dir.is_some_and(|value| value.eq_ignore_ascii_case("auto"));
            if auto || self.policy.is_auto_element(current.local_name()) {
                let direction = self.sniff(&current);
                tracing::trace!(
                    target: crate::targets::DIRECTION,
                    element = current.local_name(),
                    %direction,
                    "sniffed direction from content"
                );
                return direction;
            }

            match current.parent_element() {
                Some(parent) => current = parent,
                None => return TextDirection::LeftToRight,
            }
        }
    }

    /// Direction of the first strong character in the element's content.
    fn sniff<E: Element>(&self, element: &E) -> TextDirection {
        let found = if self.policy.is_form_control(element.local_name()) {
            value_direction(element)
        } else {
            self.first_strong_in(element)
        };
        found.unwrap_or_default()
    }

    fn first_strong_in<E: Element>(&self, element: &E) -> Option<TextDirection> {
        let mut stack = vec![self.pending_children(element).into_iter()];
        while let Some(children) = stack.last_mut() {
            match children.next() {
                Some(Pending::Found(direction)) => return Some(direction),
                Some(Pending::Element(child)) => {
                    stack.push(self.pending_children(&child).into_iter());
                }
                None => {
                    stack.pop();
                }
            }
        }
        None
    }

    /// Children still worth visiting, in document order, ending early at the
    /// first strong text or form-control value.
    fn pending_children<E: Element>(&self, element: &E) -> Vec<Pending<E>> {
        let mut pending = Vec::new();
        for child in element.child_nodes() {
            match child {
                ChildNode::Text(text) => {
                    if let Some(direction) = first_strong_direction(&text) {
                        pending.push(Pending::Found(direction));
                        break;
                    }
                }
                ChildNode::Element(child) => {
                    let name = child.local_name();
                    if self.policy.is_skipped(name)
                        || self.policy.is_auto_element(name)
                        || (self.policy.skip_elements_with_dir && self.has_valid_dir(&child))
                    {
                        continue;
                    }
                    if self.policy.is_form_control(name) {
                        if let Some(direction) = value_direction(&child) {
                            pending.push(Pending::Found(direction));
                            break;
                        }
                    } else {
                        pending.push(Pending::Element(child));
                    }
                }
            }
        }
        pending
    }

    fn has_valid_dir<E: Element>(&self, element: &E) -> bool {
        element
            .attribute(None, &self.policy.dir_attribute)
            .is_some_and(|value| {
                TextDirection::from_keyword(value).is_some() || value.eq_ignore_ascii_case("auto")
            })
    }
}

enum Pending<E> {
    Element(E),
    Found(TextDirection),
}

fn value_direction<E: Element>(element: &E) -> Option<TextDirection> {
    element
        .form_control_value()
        .and_then(|value| first_strong_direction(&value))
}

/// Resolve the direction of an element under the default HTML policy.
pub fn resolve_direction<E: Element>(element: &E) -> TextDirection {
    DirectionResolver::default().resolve(element)
}
