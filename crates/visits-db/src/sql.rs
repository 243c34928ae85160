pub(crate) fn quote_identifier(value: &str) -> String {
    let escaped = value.replace('`', "``");
    format!("`{escaped}`")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_with_backticks() {
        assert_eq!(quote_identifier("visits"), "`visits`");
    }

    #[test]
    fn doubles_embedded_backticks() {
        assert_eq!(quote_identifier("odd`name"), "`odd``name`");
    }
}
