use super::{Deferred, Outcome};
use log::debug;

/// Returns a deferred that settles like whichever input settles first.
///
/// Inputs that are already settled win in input order, so a plain value
/// wins over any pending deferred. Later settlements are ignored. An empty
/// input never settles.
pub fn race<T, E, I, O>(items: I) -> Deferred<T, E>
        where T: Clone + 'static,
              E: Clone + 'static,
              I: IntoIterator<Item = O>,
              O: Into<Outcome<T, E>> {
    let items: Vec<Deferred<T, E>> = items.into_iter()
        .map(Deferred::normalize)
        .collect();

    Deferred::new(move |complete| {
        debug!("race; {} contenders", items.len());

        for item in items {
            let (c1, c2) = (complete.clone(), complete.clone());

            item.then(
                move |val| {
                    c1.complete(val);
                    Outcome::<(), E>::Value(())
                },
                move |err| {
                    c2.fail(err);
                    Outcome::Value(())
                });
        }

        Ok(())
    })
}
