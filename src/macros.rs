// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression — works for literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! form {
    // FormData literal shorthand!
    //   form! { "filename" => name, "input" => "uploadparentcif" }
    () => {
        $crate::core::form::FormData::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut data = $crate::core::form::FormData::new();
        $(
            data.insert($key, $value);
        )+
        data
    }};
}
