use leptos::either::Either;
use leptos::prelude::*;

use crate::errors::{AppError, ErrorDisplay};
use crate::icons::LoadingIcon;

/// Renders the value of a local resource once it is loaded, or its error
#[component]
pub fn LocalUnpack<
    T: Clone + 'static,
    V: IntoView + 'static,
    F: Fn(&T) -> V + Clone + 'static,
>(
    resource: LocalResource<Result<T, AppError>>,
    #[prop(into, default = Box::new(|| view! { <LoadingIcon/> }.into_any()).into())]
    fallback: ViewFnOnce,
    children: F,
) -> impl IntoView {
    let children = StoredValue::new_local(children);

    view! {
        <Suspense fallback>
        {
            move || resource.get().map(|result| match result {
                Ok(value) => Either::Left(children.with_value(|children| children(&value))),
                Err(e) => Either::Right(view! { <ErrorDisplay error=e/> }),
            })
        }
        </Suspense>
    }.into_any()
}

/// Replaces the content of `loaded_vec` with the result of an initial load, or clears it and stores the error
pub fn handle_initial_load<T: Clone + Send + Sync + 'static>(
    load_result: Result<Vec<T>, AppError>,
    loaded_vec: RwSignal<Vec<T>>,
    load_error: RwSignal<Option<AppError>>,
) {
    match load_result {
        Ok(init_vec) => {
            loaded_vec.set(init_vec);
            load_error.set(None);
        },
        Err(e) => {
            log::error!("Failed initial load: {e}");
            loaded_vec.write().clear();
            load_error.set(Some(e))
        },
    };
}

/// Stores the result of a mutation in `value`, or stores the error and leaves `value` untouched
pub fn handle_mutation_result<T: Send + Sync + 'static>(
    mutation_result: Result<T, AppError>,
    value: RwSignal<T>,
    mutation_error: RwSignal<Option<AppError>>,
) -> bool {
    match mutation_result {
        Ok(new_value) => {
            value.set(new_value);
            mutation_error.set(None);
            true
        },
        Err(e) => {
            log::error!("Mutation failed: {e}");
            mutation_error.set(Some(e));
            false
        },
    }
}

#[cfg(test)]
mod tests {
    use leptos::prelude::*;
    use crate::errors::AppError;
    use crate::unpack::{handle_initial_load, handle_mutation_result};

    #[test]
    fn test_handle_initial_load() {
        let owner = Owner::new();
        owner.set();
        let loaded_vec = RwSignal::new(Vec::new());
        let load_error = RwSignal::new(None);

        handle_initial_load(Ok(vec![1, 2, 3]), loaded_vec, load_error);
        assert_eq!(loaded_vec.read().as_slice(), &[1, 2, 3]);
        assert_eq!(*load_error.read(), None);

        handle_initial_load(Ok(vec![4, 5, 6]), loaded_vec, load_error);
        assert_eq!(loaded_vec.read().as_slice(), &[4, 5, 6]);
        assert_eq!(*load_error.read(), None);

        let error = AppError::CommunicationError(ServerFnErrorErr::Request(String::from("test")));
        handle_initial_load(Err(error.clone()), loaded_vec, load_error);
        assert!(loaded_vec.read().is_empty());
        assert_eq!(*load_error.read(), Some(error));

        handle_initial_load(Ok(vec![7]), loaded_vec, load_error);
        assert_eq!(loaded_vec.read().as_slice(), &[7]);
        assert_eq!(*load_error.read(), None);
    }

    #[test]
    fn test_handle_mutation_result() {
        let owner = Owner::new();
        owner.set();
        let value = RwSignal::new(10);
        let mutation_error = RwSignal::new(None);

        assert!(handle_mutation_result(Ok(11), value, mutation_error));
        assert_eq!(value.get_untracked(), 11);
        assert_eq!(*mutation_error.read(), None);

        let error = AppError::StoreError(String::from("test"));
        assert!(!handle_mutation_result(Err(error.clone()), value, mutation_error));
        assert_eq!(value.get_untracked(), 11);
        assert_eq!(*mutation_error.read(), Some(error));
    }
}
