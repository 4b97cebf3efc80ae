pub mod assessment;
pub mod candidate;
pub mod job;
pub mod user;

/// Implements `store::Record` for structs carrying a `meta: RecordMeta` field.
macro_rules! impl_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::store::Record for $ty {
                fn meta(&self) -> &$crate::store::RecordMeta {
                    &self.meta
                }
                fn meta_mut(&mut self) -> &mut $crate::store::RecordMeta {
                    &mut self.meta
                }
            }
        )+
    };
}

impl_record!(
    user::User,
    user::Organization,
    job::JobPost,
    candidate::Candidate,
    candidate::ScoringResult,
    assessment::Assessment,
    assessment::Interview,
);
