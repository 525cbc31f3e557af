//! Internal macros for validator boilerplate.

/// Implements [`Templated`](crate::foundation::Templated) for a validator
/// holding its templates in a `templates: MessageTemplates` field.
macro_rules! impl_templated {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::foundation::Templated for $ty {
                fn templates(&self) -> &$crate::foundation::MessageTemplates {
                    &self.templates
                }

                fn templates_mut(&mut self) -> &mut $crate::foundation::MessageTemplates {
                    &mut self.templates
                }
            }
        )+
    };
}
