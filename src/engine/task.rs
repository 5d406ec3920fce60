// src/engine/task.rs
use std::future::Future;
use std::marker::PhantomData;

/// One independently schedulable computation: a single input, a single terminal outcome.
///
/// Implementors must be shareable across tasks because the executor hands the same
/// unit to every item of a batch.
#[async_trait::async_trait]
pub trait TaskUnit: Send + Sync + 'static {
    type Input: Send + 'static;
    type Output: Send + 'static;

    /// Name used in logs and failure reports
    fn name(&self) -> &str;

    /// Run the unit against one work item
    async fn run(&self, input: Self::Input) -> anyhow::Result<Self::Output>;
}

/// A `TaskUnit` backed by an async closure
pub struct FnUnit<F, I, O> {
    name: String,
    func: F,
    _marker: PhantomData<fn(I) -> O>,
}

/// Wrap an async closure as a named task unit
pub fn unit_fn<F, Fut, I, O>(name: impl Into<String>, func: F) -> FnUnit<F, I, O>
where
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<O>> + Send + 'static,
    I: Send + 'static,
    O: Send + 'static,
{
    FnUnit {
        name: name.into(),
        func,
        _marker: PhantomData,
    }
}

#[async_trait::async_trait]
impl<F, Fut, I, O> TaskUnit for FnUnit<F, I, O>
where
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<O>> + Send + 'static,
    I: Send + 'static,
    O: Send + 'static,
{
    type Input = I;
    type Output = O;

    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, input: I) -> anyhow::Result<O> {
        (self.func)(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fn_unit_runs_closure() {
        let unit = unit_fn("double", |x: i32| async move { anyhow::Ok(x * 2) });

        assert_eq!(unit.name(), "double");
        assert_eq!(unit.run(21).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_fn_unit_propagates_failure() {
        let unit = unit_fn("reject", |x: i32| async move {
            anyhow::ensure!(x > 0, "non-positive input {}", x);
            Ok(x)
        });

        let err = unit.run(-1).await.unwrap_err();
        assert_eq!(err.to_string(), "non-positive input -1");
    }
}
