//! The box component: one mounted instance per box in the tree.

use crate::node::{HostElement, Node, NodeRef};
use crate::resolve::{resolve, resolve_displayed, BoxDefaults, ResolvedStyle};
use crate::scheduler::{Scheduler, TimerId};
use crate::style::Styles;
use crate::transition::{SizeTransition, TargetSize, TransitionState};
use std::rc::Rc;

/// Tag of the host element every box render produces.
pub const BOX_TAG: &str = "box";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxProps {
    pub style: Styles,
    /// Animate width/height toward the declared size one cell per tick.
    pub transition_size: bool,
}

impl BoxProps {
    pub fn new(style: Styles) -> Self {
        Self {
            style,
            transition_size: false,
        }
    }

    pub fn transition_size(mut self, enabled: bool) -> Self {
        self.transition_size = enabled;
        self
    }
}

/// A mounted box.
///
/// Owns its [`SizeTransition`] exclusively. The controller is created on the
/// first render and torn down by [`BoxInstance::unmount`] or on drop, which
/// cancels any interval it still holds.
pub struct BoxInstance {
    scheduler: Rc<dyn Scheduler>,
    defaults: BoxDefaults,
    transition: Option<SizeTransition>,
}

impl BoxInstance {
    pub fn mount(scheduler: Rc<dyn Scheduler>) -> Self {
        Self::with_defaults(scheduler, BoxDefaults::default())
    }

    pub fn with_defaults(scheduler: Rc<dyn Scheduler>, defaults: BoxDefaults) -> Self {
        Self {
            scheduler,
            defaults,
            transition: None,
        }
    }

    /// Renders the box into a single host element.
    ///
    /// `children` and `node_ref` are forwarded untouched.
    pub fn render(
        &mut self,
        props: &BoxProps,
        children: impl IntoIterator<Item = Node>,
        node_ref: Option<NodeRef>,
    ) -> Node {
        let style = self.update(props);
        Node::Element(HostElement {
            tag: BOX_TAG,
            style,
            node_ref,
            children: children.into_iter().collect(),
        })
    }

    /// Counts as a render without building the host element: records the
    /// declared size and animation flag with the controller, which may start
    /// or clear the tick interval, then returns the style the host would get.
    pub fn update(&mut self, props: &BoxProps) -> ResolvedStyle {
        let target = TargetSize::from_style(&props.style);
        let scheduler = &self.scheduler;
        let transition = self
            .transition
            .get_or_insert_with(|| SizeTransition::new(Rc::clone(scheduler), target));

        transition.on_render(target);
        transition.on_animation_enabled_changed(props.transition_size);

        if props.transition_size {
            resolve_displayed(&props.style, transition.displayed(), &self.defaults)
        } else {
            resolve(&props.style, &self.defaults)
        }
    }

    /// Routes a fired interval to this instance's controller.
    pub fn handle_timer(&mut self, id: TimerId) -> bool {
        self.transition
            .as_mut()
            .is_some_and(|transition| transition.handle_timer(id))
    }

    pub fn displayed(&self) -> Option<TransitionState> {
        self.transition.as_ref().map(SizeTransition::displayed)
    }

    pub fn is_animating(&self) -> bool {
        self.transition
            .as_ref()
            .is_some_and(SizeTransition::is_animating)
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.transition.as_ref().and_then(SizeTransition::timer)
    }

    pub fn unmount(mut self) {
        if let Some(transition) = self.transition.as_mut() {
            transition.on_destroy();
        }
    }
}

impl std::fmt::Debug for BoxInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxInstance")
            .field("defaults", &self.defaults)
            .field("transition", &self.transition)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::text;
    use crate::scheduler::ManualScheduler;
    use crate::style::{Dimension, FlexDirection, Overflow};
    use crate::transition::TICK_INTERVAL;

    fn mounted() -> (Rc<ManualScheduler>, BoxInstance) {
        let sched = Rc::new(ManualScheduler::new());
        let instance = BoxInstance::mount(sched.clone());
        (sched, instance)
    }

    fn tick(sched: &ManualScheduler, instance: &mut BoxInstance) {
        for id in sched.advance(TICK_INTERVAL) {
            instance.handle_timer(id);
        }
    }

    #[test]
    fn render_produces_box_element() {
        let (_sched, mut b) = mounted();
        let props = BoxProps::new(Styles::new().direction(FlexDirection::Column));

        let node = b.render(&props, [text("hi")], None);
        let el = node.as_element().expect("box element");

        assert_eq!(el.tag, BOX_TAG);
        assert_eq!(el.style.flex_direction, FlexDirection::Column);
        assert_eq!(el.children, vec![text("hi")]);
    }

    #[test]
    fn node_ref_is_forwarded() {
        let (_sched, mut b) = mounted();
        let slot = NodeRef::new();

        let node = b.render(&BoxProps::default(), Vec::<Node>::new(), Some(slot.clone()));

        assert_eq!(node.as_element().unwrap().node_ref, Some(slot));
    }

    #[test]
    fn disabled_transition_passes_sizes_through() {
        let (sched, mut b) = mounted();

        for width in [5u16, 40, 2] {
            let props = BoxProps::new(Styles::new().width(width).height(Dimension::Percent(50.0)));
            let style = b.update(&props);
            assert_eq!(style.width, Some(Dimension::Cells(width)));
            assert_eq!(style.height, Some(Dimension::Percent(50.0)));
            tick(&sched, &mut b);
        }

        assert_eq!(sched.registrations(), 0);
        assert!(!b.is_animating());
    }

    #[test]
    fn animated_box_steps_between_renders() {
        let (sched, mut b) = mounted();
        let start = BoxProps::new(Styles::new().width(0)).transition_size(true);
        let grown = BoxProps::new(Styles::new().width(3)).transition_size(true);

        b.update(&start);
        assert_eq!(b.update(&grown).width, Some(Dimension::Cells(0)));

        tick(&sched, &mut b);
        assert_eq!(b.update(&grown).width, Some(Dimension::Cells(1)));

        tick(&sched, &mut b);
        tick(&sched, &mut b);
        assert_eq!(b.update(&grown).width, Some(Dimension::Cells(3)));
    }

    #[test]
    fn overflow_resolution_still_applies_when_animating() {
        let (_sched, mut b) = mounted();
        let props = BoxProps::new(Styles::new().width(4).overflow(Overflow::Hidden))
            .transition_size(true);

        let style = b.update(&props);

        assert_eq!(style.overflow_x, Overflow::Hidden);
        assert_eq!(style.overflow_y, Overflow::Hidden);
    }

    #[test]
    fn turning_flag_off_cancels_timer() {
        let (sched, mut b) = mounted();
        let style = Styles::new().width(10);

        b.update(&BoxProps::new(style.clone()).transition_size(true));
        assert_eq!(sched.active_timers(), 1);

        b.update(&BoxProps::new(style));
        assert_eq!(sched.active_timers(), 0);
        assert!(!b.is_animating());
    }

    #[test]
    fn unmount_cancels_timer() {
        let (sched, mut b) = mounted();
        b.update(&BoxProps::new(Styles::new().width(1)).transition_size(true));

        b.unmount();

        assert_eq!(sched.active_timers(), 0);
        assert!(sched.advance(TICK_INTERVAL * 10).is_empty());
    }

    #[test]
    fn timer_of_another_instance_is_ignored() {
        let sched = Rc::new(ManualScheduler::new());
        let mut a = BoxInstance::mount(sched.clone());
        let mut b = BoxInstance::mount(sched.clone());
        let props = BoxProps::new(Styles::new().width(0)).transition_size(true);
        a.update(&props);
        b.update(&props);

        let a_timer = a.timer().unwrap();

        assert!(a.handle_timer(a_timer));
        assert!(!b.handle_timer(a_timer));
    }

    #[test]
    fn unrendered_instance_ignores_timers() {
        let (sched, mut b) = mounted();
        let foreign = sched.set_interval(TICK_INTERVAL);

        assert!(!b.handle_timer(foreign));
        assert_eq!(b.displayed(), None);
    }
}
