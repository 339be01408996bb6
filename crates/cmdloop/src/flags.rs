use std::fmt;

bitflags::bitflags! {
    /// Structural and behavioral properties of an [`Argument`](crate::Argument).
    ///
    /// `SHORT`, `LONG` and `COMMAND` describe which identifying forms are set.
    /// The registry recomputes them on every insertion, so values supplied by
    /// callers for those three bits are never trusted.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ArgFlags: u8 {
        /// A short form (`-h`) is registered.
        const SHORT              = 1 << 0;
        /// A long form (`--help`) is registered.
        const LONG               = 1 << 1;
        /// A bare command (`help`) is registered.
        const COMMAND            = 1 << 2;
        /// Listed under "Optional" instead of "Required" in help output.
        const OPTIONAL           = 1 << 3;
        /// Only meaningful inside the interactive loop; hidden from the usage line.
        const LOOP_ONLY          = 1 << 4;
        /// The token following the argument may be taken as its data.
        const USER_DATA_ALLOWED  = 1 << 5;
        /// A data token must follow. Implies `USER_DATA_ALLOWED`.
        const USER_DATA_REQUIRED = 1 << 6;
    }
}

impl ArgFlags {
    /// The bits derived from an argument's identifying strings.
    pub const IDENTITY: Self = Self::SHORT.union(Self::LONG).union(Self::COMMAND);

    /// Build a flag set from named switches.
    ///
    /// `user_data_required` forces `user_data_allowed`.
    pub fn from_switches(
        short: bool,
        long: bool,
        command: bool,
        optional: bool,
        loop_only: bool,
        user_data_allowed: bool,
        user_data_required: bool,
    ) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::SHORT, short);
        flags.set(Self::LONG, long);
        flags.set(Self::COMMAND, command);
        flags.set(Self::OPTIONAL, optional);
        flags.set(Self::LOOP_ONLY, loop_only);
        flags.set(Self::USER_DATA_ALLOWED, user_data_allowed);
        flags.set(Self::USER_DATA_REQUIRED, user_data_required);
        flags.normalized()
    }

    /// Return a copy with `USER_DATA_REQUIRED ⇒ USER_DATA_ALLOWED` applied.
    pub fn normalized(self) -> Self {
        if self.contains(Self::USER_DATA_REQUIRED) {
            self | Self::USER_DATA_ALLOWED
        } else {
            self
        }
    }

    /// Replace the identity bits with the ones derived from the given forms.
    pub(crate) fn with_identity(self, short: &str, long: &str, command: &str) -> Self {
        let mut flags = self.difference(Self::IDENTITY);
        flags.set(Self::SHORT, !short.is_empty());
        flags.set(Self::LONG, !long.is_empty());
        flags.set(Self::COMMAND, !command.is_empty());
        flags.normalized()
    }

    pub fn has_short(&self) -> bool {
        self.contains(Self::SHORT)
    }

    pub fn has_long(&self) -> bool {
        self.contains(Self::LONG)
    }

    pub fn has_command(&self) -> bool {
        self.contains(Self::COMMAND)
    }

    pub fn is_optional(&self) -> bool {
        self.contains(Self::OPTIONAL)
    }

    pub fn is_loop_only(&self) -> bool {
        self.contains(Self::LOOP_ONLY)
    }

    pub fn is_user_data_allowed(&self) -> bool {
        self.contains(Self::USER_DATA_ALLOWED)
    }

    pub fn is_user_data_required(&self) -> bool {
        self.contains(Self::USER_DATA_REQUIRED)
    }

    /// Names of the set bits, lowercase and kebab-cased.
    pub fn names(&self) -> Vec<&'static str> {
        self.iter_names()
            .map(|(name, _)| match name {
                "SHORT" => "short",
                "LONG" => "long",
                "COMMAND" => "command",
                "OPTIONAL" => "optional",
                "LOOP_ONLY" => "loop-only",
                "USER_DATA_ALLOWED" => "user-data-allowed",
                _ => "user-data-required",
            })
            .collect()
    }
}

impl fmt::Debug for ArgFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::ArgFlags;

    #[test]
    fn equal_when_built_from_same_switches() {
        let a = ArgFlags::from_switches(true, false, true, true, false, true, false);
        let b = ArgFlags::from_switches(true, false, true, true, false, true, false);
        assert_eq!(a, b);

        let flipped = [
            ArgFlags::from_switches(false, false, true, true, false, true, false),
            ArgFlags::from_switches(true, true, true, true, false, true, false),
            ArgFlags::from_switches(true, false, false, true, false, true, false),
            ArgFlags::from_switches(true, false, true, false, false, true, false),
            ArgFlags::from_switches(true, false, true, true, true, true, false),
            ArgFlags::from_switches(true, false, true, true, false, false, false),
            ArgFlags::from_switches(true, false, true, true, false, true, true),
        ];
        for other in flipped {
            assert_ne!(a, other, "{other:?} should differ from {a:?}");
        }
    }

    #[test]
    fn required_data_implies_allowed() {
        let flags = ArgFlags::from_switches(false, false, false, false, false, false, true);
        assert!(flags.is_user_data_allowed());
        assert!(flags.is_user_data_required());

        let raw = ArgFlags::from_bits_truncate(0x40).normalized();
        assert!(raw.is_user_data_allowed());
    }

    #[test]
    fn identity_bits_follow_forms() {
        let flags = (ArgFlags::SHORT | ArgFlags::OPTIONAL).with_identity("", "--name", "name");
        assert!(!flags.has_short());
        assert!(flags.has_long());
        assert!(flags.has_command());
        assert!(flags.is_optional());
    }

    #[test]
    fn union_and_intersection() {
        let a = ArgFlags::OPTIONAL | ArgFlags::LOOP_ONLY;
        let b = ArgFlags::LOOP_ONLY | ArgFlags::COMMAND;
        assert_eq!(
            a.union(b),
            ArgFlags::OPTIONAL | ArgFlags::LOOP_ONLY | ArgFlags::COMMAND
        );
        assert_eq!(a.intersection(b), ArgFlags::LOOP_ONLY);

        let mut c = a;
        c &= b;
        assert_eq!(c, ArgFlags::LOOP_ONLY);
        c |= ArgFlags::SHORT;
        assert!(c.has_short());
    }

    #[test]
    fn raw_bits_match_names() {
        assert_eq!(ArgFlags::from_bits_truncate(0x01), ArgFlags::SHORT);
        assert_eq!(ArgFlags::from_bits_truncate(0x08), ArgFlags::OPTIONAL);
        assert_eq!(
            ArgFlags::from_bits_truncate(0x24).names(),
            vec!["command", "user-data-allowed"]
        );
    }
}
