// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finplan::validation::{
    digits_only, format_cpf, format_phone, is_plausible_email, is_valid_cpf, FormError,
    LoginForm, RegisterForm,
};

#[test]
fn accepts_known_valid_cpfs() {
    for cpf in ["52998224725", "529.982.247-25", "11144477735", "390.533.447-05"] {
        assert!(is_valid_cpf(cpf), "{} should be valid", cpf);
    }
}

#[test]
fn single_digit_mutations_are_rejected() {
    for cpf in ["52998224725", "11144477735"] {
        for (i, orig) in cpf.char_indices() {
            for d in '0'..='9' {
                if d == orig {
                    continue;
                }
                let mut mutated = cpf.to_string();
                mutated.replace_range(i..i + 1, &d.to_string());
                assert!(!is_valid_cpf(&mutated), "{} should be invalid", mutated);
            }
        }
    }
}

#[test]
fn rejects_repeated_digits_and_bad_lengths() {
    for d in '0'..='9' {
        let s: String = std::iter::repeat(d).take(11).collect();
        assert!(!is_valid_cpf(&s), "{} should be invalid", s);
    }
    assert!(!is_valid_cpf(""));
    assert!(!is_valid_cpf("5299822472"));
    assert!(!is_valid_cpf("529982247250"));
}

#[test]
fn cpf_mask_grows_with_input() {
    assert_eq!(format_cpf(""), "");
    assert_eq!(format_cpf("529"), "529");
    assert_eq!(format_cpf("5299"), "529.9");
    assert_eq!(format_cpf("529982"), "529.982");
    assert_eq!(format_cpf("5299822"), "529.982.2");
    assert_eq!(format_cpf("5299822472"), "529.982.247-2");
    assert_eq!(format_cpf("52998224725"), "529.982.247-25");
    assert_eq!(format_cpf("52998224725999"), "529.982.247-25");
    assert_eq!(format_cpf("ab5c2"), "52");
}

#[test]
fn phone_mask_grows_with_input() {
    assert_eq!(format_phone("1"), "1");
    assert_eq!(format_phone("11"), "11");
    assert_eq!(format_phone("119"), "(11) 9");
    assert_eq!(format_phone("1198765"), "(11) 98765");
    assert_eq!(format_phone("11987654"), "(11) 98765-4");
    assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
    assert_eq!(format_phone("+55 (11) 98765-4321"), "(55) 11987-6543");
}

#[test]
fn masks_keep_the_digits() {
    let long = "123456789012345";
    assert_eq!(digits_only(&format_cpf(long)), &long[..11]);
    assert_eq!(digits_only(&format_phone(long)), &long[..11]);
}

#[test]
fn masks_drop_non_ascii_digits() {
    assert_eq!(digits_only("١٢3٤"), "3");
    assert_eq!(format_cpf("١٢٣٤"), "");
    assert_eq!(format_cpf("5٢29٩982"), "529.982");
    assert_eq!(format_phone("١٢٣٤٥٦٧٨٩٠"), "");
    assert!(!is_valid_cpf("٥٢٩٩٨٢٢٤٧٢٥"));

    let mut form = good_registration();
    form.phone = "١٢٣٤٥".into();
    assert!(form.validate().phone.is_some());
    form.phone = "11 ٩٨٧٦٥-٤٣٢١".into();
    assert!(form.validate().phone.is_some());
}

#[test]
fn login_form_checks_email_then_password() {
    let mut form = LoginForm {
        email: "user.example.com".into(),
        password: String::new(),
    };
    assert_eq!(form.validate(), Err(FormError::InvalidEmail));
    form.email = "user@example.com".into();
    assert_eq!(form.validate(), Err(FormError::MissingPassword));
    form.password = "x".into();
    assert_eq!(form.validate(), Ok(()));
    assert!(!is_plausible_email("nobody"));
}

fn good_registration() -> RegisterForm {
    RegisterForm {
        name: "Maria Silva".into(),
        email: "maria@example.com".into(),
        cpf: "529.982.247-25".into(),
        phone: "(11) 98765-4321".into(),
        password: "secret1".into(),
        confirm_password: "secret1".into(),
    }
}

#[test]
fn register_form_accepts_complete_input() {
    assert!(good_registration().validate().is_empty());

    let mut optional_blank = good_registration();
    optional_blank.cpf.clear();
    optional_blank.phone.clear();
    assert!(optional_blank.validate().is_empty());
}

#[test]
fn register_form_reports_each_field() {
    let form = RegisterForm {
        name: "  Al ".into(),
        email: "al@localhost".into(),
        cpf: "111.111.111-11".into(),
        phone: "(11) 9876".into(),
        password: "12345".into(),
        confirm_password: "54321".into(),
    };
    let errs = form.validate();
    assert!(errs.name.is_some());
    assert!(errs.email.is_some());
    assert!(errs.cpf.is_some());
    assert!(errs.phone.is_some());
    assert!(errs.password.is_some());
    assert!(errs.confirm_password.is_some());
    assert_eq!(errs.messages().len(), 6);
}

#[test]
fn register_form_flags_only_mismatched_confirmation() {
    let mut form = good_registration();
    form.confirm_password = "secret2".into();
    let errs = form.validate();
    assert_eq!(errs.messages().len(), 1);
    assert!(errs.confirm_password.is_some());
}
