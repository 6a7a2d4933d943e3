// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use strum::IntoEnumIterator;

use super::*;

#[rstest]
#[case(Format::Deb, Arch::X86_64, "amd64")]
#[case(Format::Deb, Arch::Aarch64, "arm64")]
#[case(Format::Deb, Arch::Armv7, "armhf")]
#[case(Format::Deb, Arch::I686, "i386")]
#[case(Format::Rpm, Arch::X86_64, "x86_64")]
#[case(Format::Rpm, Arch::Aarch64, "aarch64")]
#[case(Format::Rpm, Arch::Armv7, "armv7hl")]
#[case(Format::Rpm, Arch::Ppc64le, "ppc64le")]
fn test_translate(#[case] format: Format, #[case] arch: Arch, #[case] expected: &str) {
    assert_eq!(translate(format, arch).unwrap(), expected);
}

#[rstest]
fn test_translate_unmapped_pair() {
    let err = translate(Format::Rpm, Arch::Riscv64).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedArchitecture {
            format: Format::Rpm,
            arch: Arch::Riscv64
        }
    ));
}

#[rstest]
fn test_translate_is_deterministic() {
    for format in Format::iter() {
        for arch in Arch::iter() {
            let first = translate(format, arch).ok();
            let second = translate(format, arch).ok();
            assert_eq!(first, second, "{format}/{arch} should translate the same way twice");
        }
    }
}

#[rstest]
#[case("x86_64", Arch::X86_64)]
#[case("amd64", Arch::X86_64)]
#[case("AMD64", Arch::X86_64)]
#[case("aarch64", Arch::Aarch64)]
#[case("arm64", Arch::Aarch64)]
#[case("armv7", Arch::Armv7)]
#[case("armhf", Arch::Armv7)]
#[case("i386", Arch::I686)]
#[case("ppc64el", Arch::Ppc64le)]
#[case("riscv64", Arch::Riscv64)]
fn test_parse_arch(#[case] value: &str, #[case] expected: Arch) {
    let arch: Arch = value.parse().expect("Should parse architecture");
    assert_eq!(arch, expected);
}

#[rstest]
fn test_parse_unknown_arch() {
    let err = "sparc".parse::<Arch>().unwrap_err();
    assert!(matches!(err, Error::UnknownArchitecture(ref name) if name == "sparc"));
}

#[rstest]
fn test_arch_display_is_canonical() {
    assert_eq!(Arch::X86_64.to_string(), "x86_64");
    assert_eq!(Arch::Aarch64.to_string(), "aarch64");
    assert_eq!(Arch::Armv7.to_string(), "armv7");
    assert_eq!(Arch::default(), Arch::X86_64);
}
