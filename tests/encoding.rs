use objc_encoding::objc::types::{
    DataModel, DecodeError, DecodeOptions, Decoder, Modifier, Primitive, TypeCache, TypeNode,
};
use objc_encoding::objc::MethodSignature;
use objc_encoding::{decode, decoded, encoded, try_decode};
use pretty_assertions::assert_eq;

fn round_trip(encoding: &str) -> TypeNode {
    let first = decode(encoding).expect("encoding decodes");
    let second = decode(&encoded(&first)).expect("re-encoding decodes");
    assert_eq!(second, first, "round trip of {encoding}");
    first
}

#[test]
fn primitive_table_is_complete() {
    let codes = "#:cCsSiIlLqQtTfdDBv?*%";
    for code in codes.chars() {
        let text = code.to_string();
        let node = decode(&text).expect("primitive decodes");
        assert!(
            node.as_primitive().is_some(),
            "{code} should decode to a primitive leaf"
        );
        assert_eq!(encoded(&node), text, "{code} re-encodes to itself");
    }
    assert_eq!(decode("@"), Some(TypeNode::Object(None)));
    assert_eq!(encoded(&TypeNode::Object(None)), "@");
}

#[test]
fn foundation_ivar_types() {
    // shapes that show up in real class dumps
    let rect = round_trip("{CGRect={CGPoint=dd}{CGSize=dd}}");
    let aggregate = rect.as_aggregate().expect("struct payload");
    assert_eq!(aggregate.name.as_deref(), Some("CGRect"));
    assert_eq!(aggregate.fields().len(), 2);
    for field in aggregate.fields() {
        let inner = field.ty.as_aggregate().expect("nested struct");
        assert_eq!(inner.fields().len(), 2, "point and size have two members");
        assert!(
            inner.fields().iter().all(|f| f.ty == TypeNode::DOUBLE),
            "members are doubles"
        );
    }

    let range = round_trip("{_NSRange=QQ}");
    assert_eq!(
        range.layout(&DataModel::LP64).map(|l| l.size),
        Some(16),
        "NSRange is two NSUIntegers"
    );

    let cf = round_trip("^{__CFRunLoop}");
    assert_eq!(decoded(&cf, "  "), "struct __CFRunLoop *");
}

#[test]
fn block_and_object_encodings() {
    let block = round_trip("@?<v@@>");
    assert_eq!(block, TypeNode::block(TypeNode::VOID, [TypeNode::ID]));
    assert_eq!(encoded(&block), "@?<v@?@>", "canonical form restores the marker");

    let completion = round_trip("@?<v@?B@\"NSError\">");
    assert_eq!(decoded(&completion, "  "), "void (^)(BOOL, NSError *)");
    assert_eq!(completion.referenced_classes(), vec!["NSError"]);

    let string = round_trip("@\"NSString\"");
    assert_eq!(string, TypeNode::object("NSString"));
    assert_eq!(encoded(&string), "@\"NSString\"");
}

#[test]
fn arrays_and_bitfields() {
    assert_eq!(
        round_trip("[10i]"),
        TypeNode::array(TypeNode::INT, Some(10))
    );
    assert_eq!(round_trip("[i]"), TypeNode::array(TypeNode::INT, None));

    let flags = round_trip("{Flags=b1b3b4}");
    let widths: Vec<_> = flags
        .as_aggregate()
        .expect("struct payload")
        .fields()
        .iter()
        .map(|field| (field.name.clone(), field.bit_width))
        .collect();
    assert_eq!(widths, vec![(None, Some(1)), (None, Some(3)), (None, Some(4))]);
}

#[test]
fn malformed_input_handling() {
    assert_eq!(decode(""), None);
    assert_eq!(decode("Z"), None);
    assert_eq!(decode("{Broken=i"), Some(TypeNode::Other("{Broken=i".into())));
    assert_eq!(
        try_decode("{Broken=i"),
        Err(DecodeError::Unterminated {
            offset: 0,
            open: '{'
        })
    );
}

#[test]
fn strict_and_lenient_decoders_disagree_on_damage() {
    let lenient = Decoder::new(DecodeOptions::default());
    let strict = Decoder::new(DecodeOptions::strict());
    assert_eq!(
        lenient.decode("{S=i?Z}"),
        Some(
            TypeNode::structure(Some("S"))
                .anonymous(TypeNode::INT)
                .anonymous(TypeNode::Primitive(Primitive::Unknown))
                .build()
        ),
        "lenient decoding keeps the readable prefix"
    );
    assert!(strict.try_decode("{S=i?Z}").is_err(), "strict decoding fails");
}

#[test]
fn method_signatures_decode_each_argument() {
    let signature = MethodSignature::parse("Vv40@0:8r^{CGPoint=dd}16o^@24Q32")
        .expect("signature parses");
    assert!(signature.is_oneway());
    let types: Vec<_> = signature.argument_types().cloned().collect();
    assert_eq!(types.len(), 5);
    assert_eq!(
        types[3],
        TypeNode::modified(
            Modifier::Out,
            TypeNode::pointer(TypeNode::Object(None))
        )
    );
    assert_eq!(
        signature.encoded(),
        "Vv40@0:8r^{CGPoint=dd}16o^@24Q32",
        "offsets survive re-encoding"
    );
}

#[test]
fn cache_serves_repeated_ivar_lookups() {
    let mut cache = TypeCache::new();
    for _ in 0..3 {
        let node = cache.decode("{CGSize=dd}").expect("decodes");
        assert_eq!(node.encoded(), "{CGSize=dd}");
    }
    assert_eq!(cache.hits(), 2);
}

#[test]
fn pretty_printing_is_idempotent() {
    let node = decode("{Node=\"next\"^{Node}\"value\"@\"NSNumber\"\"flags\"b2}").expect("decodes");
    let first = decoded(&node, "\t");
    let second = decoded(&node, "\t");
    assert_eq!(first, second);
    assert_eq!(
        first,
        "struct Node {\n\tstruct Node *next;\n\tNSNumber *value;\n\tunsigned int flags : 2;\n}"
    );
}
