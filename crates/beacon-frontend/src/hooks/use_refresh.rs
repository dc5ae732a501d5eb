use std::rc::Rc;

use yew::prelude::*;

#[derive(Default, PartialEq)]
struct Generation(u32);

impl Reducible for Generation {
    type Action = ();

    fn reduce(self: Rc<Self>, _action: Self::Action) -> Rc<Self> {
        Rc::new(Generation(self.0.wrapping_add(1)))
    }
}

/// A generation counter plus a callback that bumps it.
///
/// Put the generation in an effect's dependencies and emit the callback
/// after a mutation to re-run the effect's fetch. Going through a reducer
/// means bumps from stale async closures are never lost.
#[hook]
pub fn use_refresh() -> (u32, Callback<()>) {
    let generation = use_reducer(Generation::default);
    let dispatcher = generation.dispatcher();

    (generation.0, Callback::from(move |_| dispatcher.dispatch(())))
}
